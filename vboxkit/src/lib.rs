//! # vboxkit
//!
//! Typed client for the VBoxManage command-line tool.
//!
//! This crate translates method calls into VBoxManage invocations and parses
//! the resulting text output back into structured records. The actual
//! virtual-machine lifecycle logic lives entirely in the external binary;
//! this crate builds argument vectors, invokes the process, and parses
//! stdout.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            VBoxManage client            │
//! │ (create_vm, list_vms, storage_attach..) │
//! └──────────┬─────────────────┬────────────┘
//!            │                 │
//!            ▼                 ▼
//! ┌───────────────────┐  ┌───────────────────┐
//! │   CommandRunner   │  │   Output parsers  │
//! │ (ProcessRunner /  │  │ (anchored, fixed- │
//! │    MockRunner)    │  │  grammar scanners)│
//! └───────────────────┘  └───────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vboxkit::{CreateVmOpts, VBoxManage};
//!
//! let manage = VBoxManage::new();
//! let vm = manage.create_vm(&CreateVmOpts::new("my-vm").with_ostype("Ubuntu_64"))?;
//! println!("created {} ({})", vm.name, vm.uuid);
//! ```

pub mod error;
pub mod logging;
pub mod manage;
pub mod mock;
pub mod parsers;
pub mod runner;
pub mod types;

pub use error::ManageError;
pub use logging::{init_logging, init_logging_json};
pub use manage::{VBoxManage, VBOXMANAGE_BIN};
pub use mock::MockRunner;
pub use runner::{CommandRunner, ProcessRunner, RunOutput};
pub use types::*;
