//! Type definitions for VBoxManage operations and their parsed results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// PARSED RECORDS
// =============================================================================

/// Record returned by `createvm`: the registered machine's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmDescriptor {
    /// Human-readable machine name
    pub name: String,
    /// Machine UUID as reported by the tool
    pub uuid: String,
    /// Path to the machine settings file
    pub file_path: String,
}

/// One entry of a `list vms` / `list runningvms` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSummary {
    /// Machine name (quotes removed)
    pub name: String,
    /// Machine UUID (braces removed)
    pub uuid: String,
}

/// One entry of a `list ostypes` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsType {
    /// Guest OS identifier (e.g. "Ubuntu_64")
    pub os_type: String,
    /// Free-text description (e.g. "Ubuntu (64-bit)")
    pub os_desc: String,
}

/// Record returned by `showhdinfo`: a fixed-order labeled block.
///
/// All fields are kept as strings exactly as the tool printed them; the
/// values carry units and annotations ("128 MBytes", "normal (base)").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HddInfo {
    /// Medium UUID
    pub uuid: String,
    /// Accessibility flag ("yes" / "no")
    pub accessible: String,
    /// Logical size including unit (e.g. "128 MBytes")
    pub logical_size: String,
    /// Current size on disk including unit
    pub current_size: String,
    /// Medium type annotation (e.g. "normal (base)")
    pub disk_type: String,
    /// Storage format (e.g. "VDI")
    pub storage_format: String,
    /// Format variant (e.g. "dynamic default")
    pub format_variant: String,
    /// Absolute path of the medium file
    pub location: String,
}

// =============================================================================
// VM ADDRESSING
// =============================================================================

/// Selector for an existing machine: VBoxManage accepts either the name or
/// the UUID wherever a machine is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmRef {
    /// Address the machine by name
    Name(String),
    /// Address the machine by UUID
    Uuid(String),
}

impl VmRef {
    /// Select by name.
    pub fn name(name: impl Into<String>) -> Self {
        VmRef::Name(name.into())
    }

    /// Select by UUID.
    pub fn uuid(uuid: impl Into<String>) -> Self {
        VmRef::Uuid(uuid.into())
    }

    /// Get the command-line argument form.
    pub fn as_arg(&self) -> &str {
        match self {
            VmRef::Name(s) => s,
            VmRef::Uuid(s) => s,
        }
    }
}

// =============================================================================
// OPTION VOCABULARY
// =============================================================================

/// Hard-disk storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HdFormat {
    Vdi,
    Vmdk,
    Vhd,
    Raw,
}

impl HdFormat {
    /// Get the flag value VBoxManage expects.
    pub fn as_arg(&self) -> &'static str {
        match self {
            HdFormat::Vdi => "VDI",
            HdFormat::Vmdk => "VMDK",
            HdFormat::Vhd => "VHD",
            HdFormat::Raw => "RAW",
        }
    }
}

/// Hard-disk allocation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HdVariant {
    Standard,
    Fixed,
    Split2G,
    Stream,
    Esx,
}

impl HdVariant {
    pub fn as_arg(&self) -> &'static str {
        match self {
            HdVariant::Standard => "Standard",
            HdVariant::Fixed => "Fixed",
            HdVariant::Split2G => "Split2G",
            HdVariant::Stream => "Stream",
            HdVariant::Esx => "ESX",
        }
    }
}

/// Medium category for `closemedium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumType {
    Disk,
    Dvd,
    Floppy,
}

impl MediumType {
    pub fn as_arg(&self) -> &'static str {
        match self {
            MediumType::Disk => "disk",
            MediumType::Dvd => "dvd",
            MediumType::Floppy => "floppy",
        }
    }
}

/// Storage controller bus for `storagectl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBus {
    Ide,
    Sata,
    Scsi,
    Floppy,
    Sas,
}

impl StorageBus {
    pub fn as_arg(&self) -> &'static str {
        match self {
            StorageBus::Ide => "ide",
            StorageBus::Sata => "sata",
            StorageBus::Scsi => "scsi",
            StorageBus::Floppy => "floppy",
            StorageBus::Sas => "sas",
        }
    }
}

/// Storage controller chipset for `storagectl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageChipset {
    LsiLogic,
    LsiLogicSas,
    BusLogic,
    IntelAhci,
    Piix3,
    Piix4,
    Ich6,
    I82078,
}

impl StorageChipset {
    pub fn as_arg(&self) -> &'static str {
        match self {
            StorageChipset::LsiLogic => "LSILogic",
            StorageChipset::LsiLogicSas => "LSILogicSAS",
            StorageChipset::BusLogic => "BusLogic",
            StorageChipset::IntelAhci => "IntelAHCI",
            StorageChipset::Piix3 => "PIIX3",
            StorageChipset::Piix4 => "PIIX4",
            StorageChipset::Ich6 => "ICH6",
            StorageChipset::I82078 => "I82078",
        }
    }
}

/// Device kind for `storageattach --type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachKind {
    Hdd,
    DvdDrive,
    Fdd,
}

impl AttachKind {
    pub fn as_arg(&self) -> &'static str {
        match self {
            AttachKind::Hdd => "hdd",
            AttachKind::DvdDrive => "dvddrive",
            AttachKind::Fdd => "fdd",
        }
    }
}

/// Medium mode for `storageattach --mtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumMode {
    Normal,
    Writethrough,
    Immutable,
    Shareable,
    Readonly,
    Multiattach,
}

impl MediumMode {
    pub fn as_arg(&self) -> &'static str {
        match self {
            MediumMode::Normal => "normal",
            MediumMode::Writethrough => "writethrough",
            MediumMode::Immutable => "immutable",
            MediumMode::Shareable => "shareable",
            MediumMode::Readonly => "readonly",
            MediumMode::Multiattach => "multiattach",
        }
    }
}

/// Machine firmware for `modifyvm --firmware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Firmware {
    Bios,
    Efi,
    Efi32,
    Efi64,
}

impl Firmware {
    pub fn as_arg(&self) -> &'static str {
        match self {
            Firmware::Bios => "bios",
            Firmware::Efi => "efi",
            Firmware::Efi32 => "efi32",
            Firmware::Efi64 => "efi64",
        }
    }
}

/// Machine chipset for `modifyvm --chipset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chipset {
    Ich9,
    Piix3,
}

impl Chipset {
    pub fn as_arg(&self) -> &'static str {
        match self {
            Chipset::Ich9 => "ich9",
            Chipset::Piix3 => "piix3",
        }
    }
}

/// Boot device for `modifyvm --bootN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootDevice {
    None,
    Floppy,
    Dvd,
    Disk,
    Net,
}

impl BootDevice {
    pub fn as_arg(&self) -> &'static str {
        match self {
            BootDevice::None => "none",
            BootDevice::Floppy => "floppy",
            BootDevice::Dvd => "dvd",
            BootDevice::Disk => "disk",
            BootDevice::Net => "net",
        }
    }
}

/// NIC attachment mode for `modifyvm --nicN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NicMode {
    None,
    Null,
    Nat,
    Bridged,
    IntNet,
    HostOnly,
    Generic,
}

impl NicMode {
    pub fn as_arg(&self) -> &'static str {
        match self {
            NicMode::None => "none",
            NicMode::Null => "null",
            NicMode::Nat => "nat",
            NicMode::Bridged => "bridged",
            NicMode::IntNet => "intnet",
            NicMode::HostOnly => "hostonly",
            NicMode::Generic => "generic",
        }
    }
}

/// Emulated NIC hardware for `modifyvm --nictypeN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NicType {
    Am79C970A,
    Am79C973,
    Intel82540Em,
    Intel82543Gc,
    Intel82545Em,
    Virtio,
}

impl NicType {
    pub fn as_arg(&self) -> &'static str {
        match self {
            NicType::Am79C970A => "Am79C970A",
            NicType::Am79C973 => "Am79C973",
            NicType::Intel82540Em => "82540EM",
            NicType::Intel82543Gc => "82543GC",
            NicType::Intel82545Em => "82545EM",
            NicType::Virtio => "virtio",
        }
    }
}

/// Promiscuous-mode policy for `modifyvm --nicpromiscN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NicPromisc {
    Deny,
    AllowVms,
    AllowAll,
}

impl NicPromisc {
    pub fn as_arg(&self) -> &'static str {
        match self {
            NicPromisc::Deny => "deny",
            NicPromisc::AllowVms => "allow-vms",
            NicPromisc::AllowAll => "allow-all",
        }
    }
}

/// Frontend for `startvm --type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartType {
    Gui,
    Headless,
    Sdl,
}

impl StartType {
    pub fn as_arg(&self) -> &'static str {
        match self {
            StartType::Gui => "gui",
            StartType::Headless => "headless",
            StartType::Sdl => "sdl",
        }
    }
}

/// Power-control action for `controlvm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    PowerOff,
    Reset,
    Pause,
    Resume,
    SaveState,
    AcpiPowerButton,
}

impl ControlAction {
    pub fn as_arg(&self) -> &'static str {
        match self {
            ControlAction::PowerOff => "poweroff",
            ControlAction::Reset => "reset",
            ControlAction::Pause => "pause",
            ControlAction::Resume => "resume",
            ControlAction::SaveState => "savestate",
            ControlAction::AcpiPowerButton => "acpipowerbutton",
        }
    }
}

/// Flag value for VBoxManage's on/off toggles.
fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}

// =============================================================================
// OPERATION OPTIONS
// =============================================================================

/// Options for `createvm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVmOpts {
    /// Machine name
    pub name: String,
    /// Guest OS type identifier (e.g. "Ubuntu_64")
    pub ostype: Option<String>,
    /// Base folder for the settings file
    pub basefolder: Option<String>,
    /// Explicit machine UUID (auto-assigned by the tool if None)
    pub uuid: Option<String>,
    /// Register the machine after creation
    pub register: bool,
}

impl CreateVmOpts {
    /// Create options for a named, registered machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ostype: None,
            basefolder: None,
            uuid: None,
            register: true,
        }
    }

    /// Set the guest OS type.
    pub fn with_ostype(mut self, ostype: impl Into<String>) -> Self {
        self.ostype = Some(ostype.into());
        self
    }

    /// Set the base folder for the settings file.
    pub fn with_basefolder(mut self, basefolder: impl Into<String>) -> Self {
        self.basefolder = Some(basefolder.into());
        self
    }

    /// Set an explicit machine UUID.
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Assign a freshly generated v4 UUID.
    pub fn with_new_uuid(mut self) -> Self {
        self.uuid = Some(Uuid::new_v4().to_string());
        self
    }

    /// Create without registering.
    pub fn unregistered(mut self) -> Self {
        self.register = false;
        self
    }

    /// Build the argument vector for this invocation.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "createvm".to_string(),
            "--name".to_string(),
            self.name.clone(),
        ];
        if let Some(ref ostype) = self.ostype {
            args.push("--ostype".to_string());
            args.push(ostype.clone());
        }
        if let Some(ref basefolder) = self.basefolder {
            args.push("--basefolder".to_string());
            args.push(basefolder.clone());
        }
        if let Some(ref uuid) = self.uuid {
            args.push("--uuid".to_string());
            args.push(uuid.clone());
        }
        if self.register {
            args.push("--register".to_string());
        }
        args
    }
}

/// Per-adapter settings for `modifyvm --nicN` and friends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NicSlot {
    /// Adapter index (1-based, as VBoxManage numbers them)
    pub index: u8,
    /// Attachment mode
    pub mode: Option<NicMode>,
    /// Emulated hardware
    pub nic_type: Option<NicType>,
    /// Promiscuous-mode policy
    pub promisc: Option<NicPromisc>,
    /// Host-only adapter to bind (e.g. "vboxnet0")
    pub hostonly_adapter: Option<String>,
    /// Host interface to bridge
    pub bridge_adapter: Option<String>,
}

impl NicSlot {
    /// Settings for adapter `index`.
    pub fn new(index: u8) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: NicMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_nic_type(mut self, nic_type: NicType) -> Self {
        self.nic_type = Some(nic_type);
        self
    }

    pub fn with_promisc(mut self, promisc: NicPromisc) -> Self {
        self.promisc = Some(promisc);
        self
    }

    pub fn with_hostonly_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.hostonly_adapter = Some(adapter.into());
        self
    }

    pub fn with_bridge_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.bridge_adapter = Some(adapter.into());
        self
    }

    fn push_args(&self, args: &mut Vec<String>) {
        if let Some(mode) = self.mode {
            args.push(format!("--nic{}", self.index));
            args.push(mode.as_arg().to_string());
        }
        if let Some(nic_type) = self.nic_type {
            args.push(format!("--nictype{}", self.index));
            args.push(nic_type.as_arg().to_string());
        }
        if let Some(promisc) = self.promisc {
            args.push(format!("--nicpromisc{}", self.index));
            args.push(promisc.as_arg().to_string());
        }
        if let Some(ref adapter) = self.hostonly_adapter {
            args.push(format!("--hostonlyadapter{}", self.index));
            args.push(adapter.clone());
        }
        if let Some(ref adapter) = self.bridge_adapter {
            args.push(format!("--bridgeadapter{}", self.index));
            args.push(adapter.clone());
        }
    }
}

/// Options for `modifyvm`. Only set fields are emitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifyVmOpts {
    /// Rename the machine
    pub name: Option<String>,
    /// Change the guest OS type
    pub ostype: Option<String>,
    /// Memory size in MB
    pub memory_mb: Option<u32>,
    /// Video memory size in MB
    pub vram_mb: Option<u32>,
    /// Number of virtual CPUs
    pub cpus: Option<u32>,
    /// Firmware selection
    pub firmware: Option<Firmware>,
    /// Chipset selection
    pub chipset: Option<Chipset>,
    /// ACPI toggle
    pub acpi: Option<bool>,
    /// Keep the RTC in UTC
    pub rtc_use_utc: Option<bool>,
    /// Boot order, emitted as --boot1..--boot4
    pub boot_order: Vec<BootDevice>,
    /// Per-adapter NIC settings
    pub nics: Vec<NicSlot>,
}

impl ModifyVmOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the machine.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change the guest OS type.
    pub fn with_ostype(mut self, ostype: impl Into<String>) -> Self {
        self.ostype = Some(ostype.into());
        self
    }

    /// Set memory size in MB.
    pub fn with_memory(mut self, memory_mb: u32) -> Self {
        self.memory_mb = Some(memory_mb);
        self
    }

    /// Set video memory size in MB.
    pub fn with_vram(mut self, vram_mb: u32) -> Self {
        self.vram_mb = Some(vram_mb);
        self
    }

    /// Set the number of virtual CPUs.
    pub fn with_cpus(mut self, cpus: u32) -> Self {
        self.cpus = Some(cpus);
        self
    }

    /// Select firmware.
    pub fn with_firmware(mut self, firmware: Firmware) -> Self {
        self.firmware = Some(firmware);
        self
    }

    /// Select chipset.
    pub fn with_chipset(mut self, chipset: Chipset) -> Self {
        self.chipset = Some(chipset);
        self
    }

    /// Toggle ACPI.
    pub fn with_acpi(mut self, acpi: bool) -> Self {
        self.acpi = Some(acpi);
        self
    }

    /// Keep the RTC in UTC.
    pub fn with_rtc_use_utc(mut self, utc: bool) -> Self {
        self.rtc_use_utc = Some(utc);
        self
    }

    /// Append a boot device (first call sets --boot1, and so on).
    pub fn with_boot(mut self, device: BootDevice) -> Self {
        self.boot_order.push(device);
        self
    }

    /// Add per-adapter NIC settings.
    pub fn with_nic(mut self, nic: NicSlot) -> Self {
        self.nics.push(nic);
        self
    }

    /// Build the argument vector, addressing `vm`.
    pub fn to_args(&self, vm: &VmRef) -> Vec<String> {
        let mut args = vec!["modifyvm".to_string(), vm.as_arg().to_string()];
        if let Some(ref name) = self.name {
            args.push("--name".to_string());
            args.push(name.clone());
        }
        if let Some(ref ostype) = self.ostype {
            args.push("--ostype".to_string());
            args.push(ostype.clone());
        }
        if let Some(memory) = self.memory_mb {
            args.push("--memory".to_string());
            args.push(memory.to_string());
        }
        if let Some(vram) = self.vram_mb {
            args.push("--vram".to_string());
            args.push(vram.to_string());
        }
        if let Some(cpus) = self.cpus {
            args.push("--cpus".to_string());
            args.push(cpus.to_string());
        }
        if let Some(firmware) = self.firmware {
            args.push("--firmware".to_string());
            args.push(firmware.as_arg().to_string());
        }
        if let Some(chipset) = self.chipset {
            args.push("--chipset".to_string());
            args.push(chipset.as_arg().to_string());
        }
        if let Some(acpi) = self.acpi {
            args.push("--acpi".to_string());
            args.push(on_off(acpi).to_string());
        }
        if let Some(utc) = self.rtc_use_utc {
            args.push("--rtcuseutc".to_string());
            args.push(on_off(utc).to_string());
        }
        for (i, device) in self.boot_order.iter().enumerate() {
            args.push(format!("--boot{}", i + 1));
            args.push(device.as_arg().to_string());
        }
        for nic in &self.nics {
            nic.push_args(&mut args);
        }
        args
    }

    /// True when no setting was requested.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.ostype.is_none()
            && self.memory_mb.is_none()
            && self.vram_mb.is_none()
            && self.cpus.is_none()
            && self.firmware.is_none()
            && self.chipset.is_none()
            && self.acpi.is_none()
            && self.rtc_use_utc.is_none()
            && self.boot_order.is_empty()
            && self.nics.is_empty()
    }
}

/// Options for `createhd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHdOpts {
    /// Path of the medium file to create
    pub filename: String,
    /// Logical size in MB
    pub size_mb: u64,
    /// Storage format (tool default: VDI)
    pub format: Option<HdFormat>,
    /// Allocation variant (tool default: Standard)
    pub variant: Option<HdVariant>,
}

impl CreateHdOpts {
    pub fn new(filename: impl Into<String>, size_mb: u64) -> Self {
        Self {
            filename: filename.into(),
            size_mb,
            format: None,
            variant: None,
        }
    }

    pub fn with_format(mut self, format: HdFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_variant(mut self, variant: HdVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Build the argument vector for this invocation.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "createhd".to_string(),
            "--filename".to_string(),
            self.filename.clone(),
            "--size".to_string(),
            self.size_mb.to_string(),
        ];
        if let Some(format) = self.format {
            args.push("--format".to_string());
            args.push(format.as_arg().to_string());
        }
        if let Some(variant) = self.variant {
            args.push("--variant".to_string());
            args.push(variant.as_arg().to_string());
        }
        args
    }
}

/// Options for `storageattach`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageAttachOpts {
    /// Target machine
    pub vm: VmRef,
    /// Storage controller name (as created by `storagectl_add`)
    pub controller: String,
    /// Controller port
    pub port: u32,
    /// Device number on the port
    pub device: u32,
    /// Device kind
    pub kind: Option<AttachKind>,
    /// Medium path, UUID, or "none"/"emptydrive"
    pub medium: Option<String>,
    /// Medium mode
    pub mode: Option<MediumMode>,
}

impl StorageAttachOpts {
    pub fn new(vm: VmRef, controller: impl Into<String>) -> Self {
        Self {
            vm,
            controller: controller.into(),
            port: 0,
            device: 0,
            kind: None,
            medium: None,
            mode: None,
        }
    }

    pub fn with_port(mut self, port: u32) -> Self {
        self.port = port;
        self
    }

    pub fn with_device(mut self, device: u32) -> Self {
        self.device = device;
        self
    }

    pub fn with_kind(mut self, kind: AttachKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    pub fn with_mode(mut self, mode: MediumMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Build the argument vector for this invocation.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "storageattach".to_string(),
            self.vm.as_arg().to_string(),
            "--storagectl".to_string(),
            self.controller.clone(),
            "--port".to_string(),
            self.port.to_string(),
            "--device".to_string(),
            self.device.to_string(),
        ];
        if let Some(kind) = self.kind {
            args.push("--type".to_string());
            args.push(kind.as_arg().to_string());
        }
        if let Some(ref medium) = self.medium {
            args.push("--medium".to_string());
            args.push(medium.clone());
        }
        if let Some(mode) = self.mode {
            args.push("--mtype".to_string());
            args.push(mode.as_arg().to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_createvm_args_full() {
        let opts = CreateVmOpts::new("taco")
            .with_ostype("Linux")
            .with_basefolder("/tmp/machines")
            .with_uuid("65749ad3-a77d-4f82-9dac-6d9176bf5d23");
        assert_eq!(
            opts.to_args(),
            vec![
                "createvm",
                "--name",
                "taco",
                "--ostype",
                "Linux",
                "--basefolder",
                "/tmp/machines",
                "--uuid",
                "65749ad3-a77d-4f82-9dac-6d9176bf5d23",
                "--register",
            ]
        );
    }

    #[test]
    fn test_createvm_args_minimal_unregistered() {
        let opts = CreateVmOpts::new("taco").unregistered();
        assert_eq!(opts.to_args(), vec!["createvm", "--name", "taco"]);
    }

    #[test]
    fn test_createvm_with_new_uuid_is_valid_v4() {
        let opts = CreateVmOpts::new("taco").with_new_uuid();
        let uuid = opts.uuid.expect("uuid assigned");
        assert!(Uuid::parse_str(&uuid).is_ok());
    }

    #[test]
    fn test_modifyvm_args_basic_configuration() {
        let opts = ModifyVmOpts::new()
            .with_memory(256)
            .with_rtc_use_utc(true)
            .with_nic(
                NicSlot::new(1)
                    .with_mode(NicMode::HostOnly)
                    .with_nic_type(NicType::Am79C973)
                    .with_hostonly_adapter("vboxnet0"),
            );
        assert_eq!(
            opts.to_args(&VmRef::name("foo")),
            vec![
                "modifyvm",
                "foo",
                "--memory",
                "256",
                "--rtcuseutc",
                "on",
                "--nic1",
                "hostonly",
                "--nictype1",
                "Am79C973",
                "--hostonlyadapter1",
                "vboxnet0",
            ]
        );
    }

    #[test]
    fn test_modifyvm_boot_order_indices() {
        let opts = ModifyVmOpts::new()
            .with_boot(BootDevice::Dvd)
            .with_boot(BootDevice::Disk)
            .with_boot(BootDevice::None);
        let args = opts.to_args(&VmRef::uuid("u"));
        assert_eq!(
            &args[2..],
            &[
                "--boot1".to_string(),
                "dvd".to_string(),
                "--boot2".to_string(),
                "disk".to_string(),
                "--boot3".to_string(),
                "none".to_string(),
            ]
        );
    }

    #[test]
    fn test_modifyvm_empty() {
        assert!(ModifyVmOpts::new().is_empty());
        assert!(!ModifyVmOpts::new().with_cpus(2).is_empty());
    }

    #[test]
    fn test_createhd_args() {
        let opts = CreateHdOpts::new("/tmp/test.vdi", 128)
            .with_format(HdFormat::Vdi)
            .with_variant(HdVariant::Standard);
        assert_eq!(
            opts.to_args(),
            vec![
                "createhd",
                "--filename",
                "/tmp/test.vdi",
                "--size",
                "128",
                "--format",
                "VDI",
                "--variant",
                "Standard",
            ]
        );
    }

    #[test]
    fn test_storageattach_args() {
        let opts = StorageAttachOpts::new(VmRef::name("taco"), "primary")
            .with_kind(AttachKind::Hdd)
            .with_medium("/tmp/test.vdi");
        assert_eq!(
            opts.to_args(),
            vec![
                "storageattach",
                "taco",
                "--storagectl",
                "primary",
                "--port",
                "0",
                "--device",
                "0",
                "--type",
                "hdd",
                "--medium",
                "/tmp/test.vdi",
            ]
        );
    }

    #[test]
    fn test_nic_type_arg_values() {
        assert_eq!(NicType::Intel82540Em.as_arg(), "82540EM");
        assert_eq!(NicPromisc::AllowVms.as_arg(), "allow-vms");
        assert_eq!(StorageChipset::LsiLogicSas.as_arg(), "LSILogicSAS");
    }

    #[test]
    fn test_records_serialize_to_json() {
        let vm = VmSummary {
            name: "taco".to_string(),
            uuid: "65749ad3-a77d-4f82-9dac-6d9176bf5d23".to_string(),
        };
        let json = serde_json::to_string(&vm).unwrap();
        assert!(json.contains("\"name\":\"taco\""));
        let back: VmSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vm);
    }

    #[test]
    fn test_vm_ref_as_arg() {
        assert_eq!(VmRef::name("taco").as_arg(), "taco");
        assert_eq!(
            VmRef::uuid("65749ad3-a77d-4f82-9dac-6d9176bf5d23").as_arg(),
            "65749ad3-a77d-4f82-9dac-6d9176bf5d23"
        );
    }
}
