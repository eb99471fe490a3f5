//! The VBoxManage client.
//!
//! Builds the argument vector for each operation, drives it through a
//! [`CommandRunner`], checks the exit status, and hands the captured
//! standard output to the matching parser. All virtualization logic lives in
//! the external tool; this layer is a format translator.

use std::collections::HashMap;

use tracing::{info, instrument, warn};

use crate::error::{ManageError, Result};
use crate::parsers;
use crate::runner::{CommandRunner, ProcessRunner, RunOutput};
use crate::types::{
    ControlAction, CreateHdOpts, CreateVmOpts, HddInfo, MediumType, ModifyVmOpts, OsType,
    StartType, StorageAttachOpts, StorageBus, StorageChipset, VmDescriptor, VmRef, VmSummary,
};

/// Default binary name, resolved through PATH.
pub const VBOXMANAGE_BIN: &str = "VBoxManage";

/// Client for the VBoxManage command-line tool.
///
/// Every operation is synchronous: one invocation produces one pair of
/// captured streams, consumed by one parser call.
pub struct VBoxManage {
    /// Path or name of the VBoxManage binary
    binary: String,
    runner: Box<dyn CommandRunner>,
}

impl VBoxManage {
    /// Create a client that spawns the `VBoxManage` binary from PATH.
    pub fn new() -> Self {
        Self {
            binary: VBOXMANAGE_BIN.to_string(),
            runner: Box::new(ProcessRunner::new()),
        }
    }

    /// Set the binary path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Substitute the runner (scripted transcripts in tests).
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Run one invocation and enforce a zero exit status.
    fn run(&self, args: Vec<String>) -> Result<RunOutput> {
        let output = self.runner.run(&self.binary, &args)?;

        if output.status != 0 {
            let command = format!("{} {}", self.binary, args.join(" "));
            warn!(status = output.status, %command, "VBoxManage command failed");
            return Err(ManageError::CommandFailed {
                status: output.status,
                command,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(output)
    }

    fn list(&self, directive: &str) -> Result<RunOutput> {
        self.run(vec!["list".to_string(), directive.to_string()])
    }

    /// Get the tool version string.
    #[instrument(skip(self))]
    pub fn version(&self) -> Result<String> {
        let output = self.run(vec!["--version".to_string()])?;
        parsers::parse_version(&output.stdout)
    }

    /// List all registered machines, in tool output order.
    #[instrument(skip(self))]
    pub fn list_vms(&self) -> Result<Vec<VmSummary>> {
        let output = self.list("vms")?;
        parsers::parse_list_vms(&output.stdout)
    }

    /// List currently running machines, in tool output order.
    #[instrument(skip(self))]
    pub fn list_runningvms(&self) -> Result<Vec<VmSummary>> {
        let output = self.list("runningvms")?;
        parsers::parse_list_vms(&output.stdout)
    }

    /// List supported guest OS types, in tool output order.
    #[instrument(skip(self))]
    pub fn list_ostypes(&self) -> Result<Vec<OsType>> {
        let output = self.list("ostypes")?;
        parsers::parse_list_ostypes(&output.stdout)
    }

    /// Create (and by default register) a machine.
    #[instrument(skip(self, opts), fields(vm_name = %opts.name))]
    pub fn create_vm(&self, opts: &CreateVmOpts) -> Result<VmDescriptor> {
        let output = self.run(opts.to_args())?;
        let vm = parsers::parse_createvm(&output.stdout)?;
        info!(uuid = %vm.uuid, "Machine created");
        Ok(vm)
    }

    /// Unregister a machine, optionally deleting its files.
    ///
    /// The tool's output is not parsed; success is signaled by the exit
    /// status alone. Returns the raw standard output.
    #[instrument(skip(self))]
    pub fn unregister_vm(&self, vm: &VmRef, delete: bool) -> Result<String> {
        let mut args = vec!["unregistervm".to_string(), vm.as_arg().to_string()];
        if delete {
            args.push("--delete".to_string());
        }
        let output = self.run(args)?;
        info!("Machine unregistered");
        Ok(output.stdout)
    }

    /// Apply machine settings. Output is not parsed; returns raw stdout.
    #[instrument(skip(self, opts))]
    pub fn modify_vm(&self, vm: &VmRef, opts: &ModifyVmOpts) -> Result<String> {
        let output = self.run(opts.to_args(vm))?;
        Ok(output.stdout)
    }

    /// Get machine settings as a key/value mapping
    /// (`showvminfo --machinereadable`).
    #[instrument(skip(self))]
    pub fn show_vm_info(&self, vm: &VmRef) -> Result<HashMap<String, String>> {
        let output = self.run(vec![
            "showvminfo".to_string(),
            vm.as_arg().to_string(),
            "--machinereadable".to_string(),
        ])?;
        parsers::parse_showvminfo(&output.stdout)
    }

    /// Start a machine. Returns the identifier echoed by the tool's
    /// confirmation line.
    #[instrument(skip(self))]
    pub fn start_vm(&self, vm: &VmRef, start_type: StartType) -> Result<String> {
        let output = self.run(vec![
            "startvm".to_string(),
            vm.as_arg().to_string(),
            "--type".to_string(),
            start_type.as_arg().to_string(),
        ])?;
        let started = parsers::parse_startvm(&output.stdout)?;
        info!(started = %started, "Machine started");
        Ok(started)
    }

    /// Send a power-control action to a running machine. Output is not
    /// parsed; returns raw stdout.
    #[instrument(skip(self))]
    pub fn control_vm(&self, vm: &VmRef, action: ControlAction) -> Result<String> {
        let output = self.run(vec![
            "controlvm".to_string(),
            vm.as_arg().to_string(),
            action.as_arg().to_string(),
        ])?;
        Ok(output.stdout)
    }

    /// Create a hard-disk medium. Returns the new medium's UUID.
    #[instrument(skip(self, opts), fields(filename = %opts.filename))]
    pub fn create_hd(&self, opts: &CreateHdOpts) -> Result<String> {
        let output = self.run(opts.to_args())?;
        let uuid = parsers::parse_createhd(&output.stdout)?;
        info!(uuid = %uuid, "Medium created");
        Ok(uuid)
    }

    /// Get the fixed-schema info block for a hard-disk medium.
    #[instrument(skip(self))]
    pub fn show_hd_info(&self, filename: &str) -> Result<HddInfo> {
        let output = self.run(vec!["showhdinfo".to_string(), filename.to_string()])?;
        parsers::parse_showhdinfo(&output.stdout)
    }

    /// Remove a medium from the registry, optionally deleting the file.
    ///
    /// `target` is the medium's filename or UUID; omitting it is a caller
    /// error reported without invoking the tool. Output is not parsed.
    #[instrument(skip(self))]
    pub fn close_medium(
        &self,
        kind: MediumType,
        target: Option<&str>,
        delete: bool,
    ) -> Result<String> {
        let target = target.ok_or_else(|| {
            ManageError::MissingArgument("closemedium requires a filename or uuid".to_string())
        })?;
        let mut args = vec![
            "closemedium".to_string(),
            kind.as_arg().to_string(),
            target.to_string(),
        ];
        if delete {
            args.push("--delete".to_string());
        }
        let output = self.run(args)?;
        Ok(output.stdout)
    }

    /// Attach a medium to a storage controller. Output is not parsed.
    #[instrument(skip(self, opts), fields(controller = %opts.controller))]
    pub fn storage_attach(&self, opts: &StorageAttachOpts) -> Result<String> {
        let output = self.run(opts.to_args())?;
        Ok(output.stdout)
    }

    /// Add a storage controller to a machine. Output is not parsed.
    #[instrument(skip(self))]
    pub fn storagectl_add(
        &self,
        vm: &VmRef,
        name: &str,
        bus: StorageBus,
        chipset: Option<StorageChipset>,
    ) -> Result<String> {
        let mut args = vec![
            "storagectl".to_string(),
            vm.as_arg().to_string(),
            "--name".to_string(),
            name.to_string(),
            "--add".to_string(),
            bus.as_arg().to_string(),
        ];
        if let Some(chipset) = chipset {
            args.push("--controller".to_string());
            args.push(chipset.as_arg().to_string());
        }
        let output = self.run(args)?;
        Ok(output.stdout)
    }

    /// Remove a storage controller from a machine. Output is not parsed.
    #[instrument(skip(self))]
    pub fn storagectl_remove(&self, vm: &VmRef, name: &str) -> Result<String> {
        let output = self.run(vec![
            "storagectl".to_string(),
            vm.as_arg().to_string(),
            "--name".to_string(),
            name.to_string(),
            "--remove".to_string(),
        ])?;
        Ok(output.stdout)
    }
}

impl Default for VBoxManage {
    fn default() -> Self {
        Self::new()
    }
}
