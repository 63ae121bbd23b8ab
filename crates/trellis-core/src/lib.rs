//! trellis-core
//!
//! Core building blocks for the Trellis project board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, project, status, input, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, Surface, DataTransfer）
//! - **impls**: 実装（MemorySurface, MemoryTransfer）
//! - **store**: observable な ProjectStore（single source of truth）
//! - **drag**: ドラッグ＆ドロップのプロトコル（DragSource, DropTarget, DragSession）
//! - **app**: views と Board の組み立て（ProjectForm, ProjectList, ProjectItem）

pub mod app;
pub mod domain;
pub mod drag;
pub mod impls;
pub mod ports;
pub mod store;
