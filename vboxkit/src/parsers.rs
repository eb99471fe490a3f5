//! Output parsers for VBoxManage command output.
//!
//! One routine per command type, each a single-pass scanner over the captured
//! standard output. The grammars are literal-anchored and deliberately
//! brittle: they are coupled bit-for-bit to the tool's output formatting, and
//! any deviation (reordered fields, missing labels, stray characters) fails
//! with [`ManageError::ParseFailed`] rather than producing a partial record.
//!
//! Parsers are pure functions of their input; re-parsing the same text yields
//! the same result.

use std::collections::HashMap;

use crate::error::{ManageError, Result};
use crate::types::{HddInfo, OsType, VmDescriptor, VmSummary};

/// Strip one layer of surrounding double quotes, if present.
fn strip_outer_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// True when `s` is a hyphenated 8-4-4-4-12 hex UUID.
fn is_hex_uuid(s: &str) -> bool {
    let segments: Vec<&str> = s.split('-').collect();
    segments.len() == 5
        && segments
            .iter()
            .zip([8usize, 4, 4, 4, 12])
            .all(|(seg, len)| seg.len() == len && seg.chars().all(|c| c.is_ascii_hexdigit()))
}

/// True when every char of `s` satisfies `allowed`.
fn matches_class(s: &str, allowed: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(allowed)
}

/// Parse `VBoxManage --version` output: a single trimmed version token.
pub fn parse_version(stdout: &str) -> Result<String> {
    let version = stdout.trim();
    if version.is_empty() {
        return Err(ManageError::ParseFailed(
            "version output was empty".to_string(),
        ));
    }
    Ok(version.to_string())
}

/// Parse `list vms` / `list runningvms` output.
///
/// Each non-empty line is one `"name" {uuid}` block. Every block yields one
/// record, in source order. A host with no registered machines prints
/// nothing, which parses to an empty vector; any non-empty line that does
/// not match the block shape fails.
pub fn parse_list_vms(stdout: &str) -> Result<Vec<VmSummary>> {
    let mut vms = Vec::new();

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let rest = line.strip_prefix('"').ok_or_else(|| {
            ManageError::ParseFailed(format!("expected quoted VM name, got: {line}"))
        })?;
        let (name, rest) = rest.split_once('"').ok_or_else(|| {
            ManageError::ParseFailed(format!("unterminated VM name in: {line}"))
        })?;

        let rest = rest.trim_start();
        let uuid = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .ok_or_else(|| {
                ManageError::ParseFailed(format!("expected brace-delimited UUID in: {line}"))
            })?;
        if !matches_class(uuid, |c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ManageError::ParseFailed(format!(
                "malformed UUID in: {line}"
            )));
        }

        vms.push(VmSummary {
            name: name.to_string(),
            uuid: uuid.to_string(),
        });
    }

    Ok(vms)
}

/// Parse `list ostypes` output: repeated two-line `ID:` / `Description:`
/// pairs, in source order. Blank separator lines between records are
/// allowed; anything else fails.
pub fn parse_list_ostypes(stdout: &str) -> Result<Vec<OsType>> {
    let mut ostypes = Vec::new();
    let mut lines = stdout.lines().filter(|l| !l.trim().is_empty());

    while let Some(line) = lines.next() {
        let os_type = line
            .trim()
            .strip_prefix("ID:")
            .map(str::trim)
            .ok_or_else(|| {
                ManageError::ParseFailed(format!("expected 'ID:' anchor, got: {}", line.trim()))
            })?;
        if !matches_class(os_type, |c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | ']' | '_')
        }) {
            return Err(ManageError::ParseFailed(format!(
                "malformed OS type identifier: {os_type}"
            )));
        }

        let desc_line = lines.next().ok_or_else(|| {
            ManageError::ParseFailed(format!("missing 'Description:' line after ID {os_type}"))
        })?;
        let os_desc = desc_line
            .trim()
            .strip_prefix("Description:")
            .map(str::trim)
            .ok_or_else(|| {
                ManageError::ParseFailed(format!(
                    "expected 'Description:' anchor, got: {}",
                    desc_line.trim()
                ))
            })?;
        if !matches_class(os_desc, |c| {
            c.is_ascii_alphanumeric() || matches!(c, '/' | ' ' | '(' | ')' | '.' | '-')
        }) {
            return Err(ManageError::ParseFailed(format!(
                "malformed OS description: {os_desc}"
            )));
        }

        ostypes.push(OsType {
            os_type: os_type.to_string(),
            os_desc: os_desc.to_string(),
        });
    }

    if ostypes.is_empty() {
        return Err(ManageError::ParseFailed(
            "expected at least one ID/Description record".to_string(),
        ));
    }

    Ok(ostypes)
}

/// Parse `createvm` output: exactly three anchored clauses in sequence.
///
/// ```text
/// Virtual machine 'foobar' is created and registered.
/// UUID: 65749ad3-a77d-4f82-9dac-6d9176bf5d23
/// Settings file: '/home/user/VirtualBox VMs/foobar/foobar.vbox'
/// ```
///
/// Reordered or malformed input fails; no partial record is returned.
pub fn parse_createvm(stdout: &str) -> Result<VmDescriptor> {
    let mut lines = stdout.lines().filter(|l| !l.trim().is_empty());

    let name_line = lines
        .next()
        .ok_or_else(|| ManageError::ParseFailed("empty createvm output".to_string()))?
        .trim();
    let name = name_line
        .strip_prefix("Virtual machine '")
        .and_then(|r| r.split_once('\''))
        .and_then(|(name, rest)| {
            (rest.trim() == "is created and registered." && !name.is_empty()).then_some(name)
        })
        .ok_or_else(|| {
            ManageError::ParseFailed(format!("malformed creation line: {name_line}"))
        })?;

    let uuid_line = lines
        .next()
        .ok_or_else(|| ManageError::ParseFailed("missing 'UUID:' line".to_string()))?
        .trim();
    let uuid = uuid_line.strip_prefix("UUID:").map(str::trim).ok_or_else(|| {
        ManageError::ParseFailed(format!("expected 'UUID:' anchor, got: {uuid_line}"))
    })?;
    if !matches_class(uuid, |c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ManageError::ParseFailed(format!("malformed UUID: {uuid}")));
    }

    let file_line = lines
        .next()
        .ok_or_else(|| ManageError::ParseFailed("missing 'Settings file:' line".to_string()))?
        .trim();
    let file_path = file_line
        .strip_prefix("Settings file:")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('\''))
        .and_then(|r| r.strip_suffix('\''))
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            ManageError::ParseFailed(format!("malformed settings file line: {file_line}"))
        })?;

    Ok(VmDescriptor {
        name: name.to_string(),
        uuid: uuid.to_string(),
        file_path: file_path.to_string(),
    })
}

/// Parse `showvminfo --machinereadable` output.
///
/// Each non-empty line must contain exactly one `=`: the left side,
/// lower-cased, is the key; the right side, with one layer of surrounding
/// double quotes stripped, is the value. A line without `=` (or with more
/// than one) is a formatting error.
pub fn parse_showvminfo(stdout: &str) -> Result<HashMap<String, String>> {
    let mut info = HashMap::new();

    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('=');
        let (key, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                return Err(ManageError::ParseFailed(format!(
                    "expected exactly one '=' in line: {line}"
                )))
            }
        };

        info.insert(
            key.to_lowercase(),
            strip_outer_quotes(value).to_string(),
        );
    }

    Ok(info)
}

/// Parse `showhdinfo` output: an exact ordered sequence of labeled lines.
///
/// ```text
/// UUID:                 1e489961-954b-455a-80e6-873c2bef681b
/// Accessible:           yes
/// Logical size:         128 MBytes
/// Current size on disk: 0 MBytes
/// Type:                 normal (base)
/// Storage format:       VDI
/// Format variant:       dynamic default
/// Location:             /tmp/test.vdi
/// ```
///
/// Each label is a literal anchor and each value is constrained to a
/// per-field character class. Field order is fixed; a reordered or missing
/// label fails.
pub fn parse_showhdinfo(stdout: &str) -> Result<HddInfo> {
    type FieldCheck = fn(char) -> bool;
    const SCHEMA: [(&str, FieldCheck); 8] = [
        ("UUID:", |c| c.is_ascii_alphanumeric() || c == '-'),
        ("Accessible:", |c| c.is_ascii_alphabetic()),
        ("Logical size:", |c| c.is_ascii_alphanumeric() || c == ' '),
        ("Current size on disk:", |c| {
            c.is_ascii_alphanumeric() || c == ' '
        }),
        ("Type:", |c| {
            c.is_ascii_alphabetic() || matches!(c, ' ' | '(' | ')')
        }),
        ("Storage format:", |c| c.is_ascii_alphabetic()),
        ("Format variant:", |c| c.is_ascii_alphanumeric() || c == ' '),
        ("Location:", |c| {
            c.is_ascii_alphanumeric() || matches!(c, ' ' | '/' | '.' | '-' | '_')
        }),
    ];

    let mut lines = stdout.lines().filter(|l| !l.trim().is_empty());
    let mut fields = Vec::with_capacity(SCHEMA.len());

    for (label, check) in SCHEMA {
        let line = lines
            .next()
            .ok_or_else(|| ManageError::ParseFailed(format!("missing '{label}' line")))?
            .trim();
        let value = line.strip_prefix(label).map(str::trim).ok_or_else(|| {
            ManageError::ParseFailed(format!("expected '{label}' anchor, got: {line}"))
        })?;
        if !matches_class(value, check) {
            return Err(ManageError::ParseFailed(format!(
                "malformed value for '{label}': {value}"
            )));
        }
        fields.push(value.to_string());
    }

    let fields: [String; 8] = fields
        .try_into()
        .map_err(|_| ManageError::ParseFailed("incomplete medium info block".to_string()))?;
    let [uuid, accessible, logical_size, current_size, disk_type, storage_format, format_variant, location] =
        fields;
    Ok(HddInfo {
        uuid,
        accessible,
        logical_size,
        current_size,
        disk_type,
        storage_format,
        format_variant,
        location,
    })
}

/// Parse `createhd` output: `Disk image created. UUID: <uuid>` where the
/// UUID must be hyphenated 8-4-4-4-12 hex. Returns the UUID.
pub fn parse_createhd(stdout: &str) -> Result<String> {
    let line = stdout
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ManageError::ParseFailed("empty createhd output".to_string()))?
        .trim();

    let uuid = line
        .strip_prefix("Disk image created. UUID:")
        .map(str::trim)
        .ok_or_else(|| {
            ManageError::ParseFailed(format!("expected 'Disk image created.' anchor, got: {line}"))
        })?;
    if !is_hex_uuid(uuid) {
        return Err(ManageError::ParseFailed(format!(
            "malformed medium UUID: {uuid}"
        )));
    }

    Ok(uuid.to_string())
}

/// Parse `startvm` output: extracts the quoted machine identifier from the
/// `VM "<id>" has been successfully started.` confirmation line.
pub fn parse_startvm(stdout: &str) -> Result<String> {
    for line in stdout.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("VM \"") {
            if let Some((id, tail)) = rest.split_once('"') {
                if tail.trim() == "has been successfully started." && !id.is_empty() {
                    return Ok(id.to_string());
                }
            }
        }
    }
    Err(ManageError::ParseFailed(
        "no 'successfully started' confirmation in startvm output".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATEVM_OUTPUT: &str = "\
Virtual machine 'foobar' is created and registered.
UUID: 65749ad3-a77d-4f82-9dac-6d9176bf5d23
Settings file: '/home/user/VirtualBox VMs/foobar/foobar.vbox'
";

    const SHOWHDINFO_OUTPUT: &str = "\
UUID:                 1e489961-954b-455a-80e6-873c2bef681b
Accessible:           yes
Logical size:         128 MBytes
Current size on disk: 0 MBytes
Type:                 normal (base)
Storage format:       VDI
Format variant:       dynamic default
Location:             /tmp/test.vdi
";

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("6.1.38r153438\n").unwrap(), "6.1.38r153438");
    }

    #[test]
    fn test_parse_version_empty_fails() {
        assert!(matches!(
            parse_version("  \n"),
            Err(ManageError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_parse_list_vms_preserves_order() {
        let stdout = "\
\"alpha\" {9a3f1d00-21a9-4e73-bdd9-58536411e73a}
\"beta\" {c5b0a3d2-7b11-4f02-9fd7-2c9e9ec5b2f1}
\"gamma\" {11f08fe2-aa9c-4cb0-8c50-2b0a6eccba70}
";
        let vms = parse_list_vms(stdout).unwrap();
        assert_eq!(vms.len(), 3);
        assert_eq!(vms[0].name, "alpha");
        assert_eq!(vms[1].name, "beta");
        assert_eq!(vms[2].name, "gamma");
        assert_eq!(vms[0].uuid, "9a3f1d00-21a9-4e73-bdd9-58536411e73a");
    }

    #[test]
    fn test_parse_list_vms_name_with_spaces() {
        let vms =
            parse_list_vms("\"my test vm\" {9a3f1d00-21a9-4e73-bdd9-58536411e73a}\n").unwrap();
        assert_eq!(vms[0].name, "my test vm");
    }

    #[test]
    fn test_parse_list_vms_empty_input() {
        assert!(parse_list_vms("").unwrap().is_empty());
        assert!(parse_list_vms("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_list_vms_malformed_fails() {
        // missing quotes
        assert!(parse_list_vms("alpha {9a3f1d00}").is_err());
        // missing braces
        assert!(parse_list_vms("\"alpha\" 9a3f1d00").is_err());
        // garbage uuid
        assert!(parse_list_vms("\"alpha\" {not a uuid!}").is_err());
        // one good line does not rescue a bad one
        let stdout = "\"alpha\" {9a3f1d00-21a9-4e73-bdd9-58536411e73a}\ngarbage\n";
        assert!(parse_list_vms(stdout).is_err());
    }

    #[test]
    fn test_parse_list_ostypes() {
        let stdout = "\
ID:          Other
Description: Other/Unknown

ID:          Windows31
Description: Windows 3.1

ID:          Ubuntu_64
Description: Ubuntu (64-bit)
";
        let ostypes = parse_list_ostypes(stdout).unwrap();
        assert_eq!(ostypes.len(), 3);
        assert_eq!(ostypes[0].os_type, "Other");
        assert_eq!(ostypes[0].os_desc, "Other/Unknown");
        assert_eq!(ostypes[2].os_type, "Ubuntu_64");
        assert_eq!(ostypes[2].os_desc, "Ubuntu (64-bit)");
    }

    #[test]
    fn test_parse_list_ostypes_unpaired_fails() {
        assert!(parse_list_ostypes("ID: Other\nID: Windows31\n").is_err());
        assert!(parse_list_ostypes("Description: Other/Unknown\n").is_err());
        assert!(parse_list_ostypes("ID: Other\n").is_err());
        assert!(parse_list_ostypes("").is_err());
    }

    #[test]
    fn test_parse_createvm() {
        let vm = parse_createvm(CREATEVM_OUTPUT).unwrap();
        assert_eq!(vm.name, "foobar");
        assert_eq!(vm.uuid, "65749ad3-a77d-4f82-9dac-6d9176bf5d23");
        assert_eq!(vm.file_path, "/home/user/VirtualBox VMs/foobar/foobar.vbox");
    }

    #[test]
    fn test_parse_createvm_fields_are_substrings_of_input() {
        let vm = parse_createvm(CREATEVM_OUTPUT).unwrap();
        assert!(CREATEVM_OUTPUT.contains(&vm.name));
        assert!(CREATEVM_OUTPUT.contains(&vm.uuid));
        assert!(CREATEVM_OUTPUT.contains(&vm.file_path));
    }

    #[test]
    fn test_parse_createvm_reordered_fails() {
        let reordered = "\
UUID: 65749ad3-a77d-4f82-9dac-6d9176bf5d23
Virtual machine 'foobar' is created and registered.
Settings file: '/tmp/foobar.vbox'
";
        assert!(parse_createvm(reordered).is_err());
    }

    #[test]
    fn test_parse_createvm_truncated_fails() {
        let truncated = "Virtual machine 'foobar' is created and registered.\n";
        assert!(parse_createvm(truncated).is_err());
        assert!(parse_createvm("").is_err());
    }

    #[test]
    fn test_parse_createvm_unquoted_path_fails() {
        let malformed = "\
Virtual machine 'foobar' is created and registered.
UUID: 65749ad3-a77d-4f82-9dac-6d9176bf5d23
Settings file: /tmp/foobar.vbox
";
        assert!(parse_createvm(malformed).is_err());
    }

    #[test]
    fn test_parse_showvminfo() {
        let stdout = "\
name=\"taco\"
UUID=\"65749ad3-a77d-4f82-9dac-6d9176bf5d23\"
memory=128
rtcuseutc=\"on\"
";
        let info = parse_showvminfo(stdout).unwrap();
        assert_eq!(info.len(), 4);
        assert_eq!(info["name"], "taco");
        assert_eq!(info["uuid"], "65749ad3-a77d-4f82-9dac-6d9176bf5d23");
        assert_eq!(info["memory"], "128");
        assert_eq!(info["rtcuseutc"], "on");
    }

    #[test]
    fn test_parse_showvminfo_no_quotes_left_in_values() {
        let stdout = "a=\"x\"\nb=\"y y\"\nc=z\n";
        let info = parse_showvminfo(stdout).unwrap();
        for value in info.values() {
            assert!(!value.starts_with('"'));
            assert!(!value.ends_with('"'));
        }
    }

    #[test]
    fn test_parse_showvminfo_entry_count_matches_lines() {
        let stdout = "k1=v1\nk2=v2\n\nk3=v3\n";
        assert_eq!(parse_showvminfo(stdout).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_showvminfo_line_without_separator_fails() {
        assert!(parse_showvminfo("name=\"taco\"\ngarbage line\n").is_err());
    }

    #[test]
    fn test_parse_showvminfo_double_separator_fails() {
        assert!(parse_showvminfo("key=a=b\n").is_err());
    }

    #[test]
    fn test_parse_showhdinfo() {
        let info = parse_showhdinfo(SHOWHDINFO_OUTPUT).unwrap();
        assert_eq!(info.uuid, "1e489961-954b-455a-80e6-873c2bef681b");
        assert_eq!(info.accessible, "yes");
        assert_eq!(info.logical_size, "128 MBytes");
        assert_eq!(info.current_size, "0 MBytes");
        assert_eq!(info.disk_type, "normal (base)");
        assert_eq!(info.storage_format, "VDI");
        assert_eq!(info.format_variant, "dynamic default");
        assert_eq!(info.location, "/tmp/test.vdi");
    }

    #[test]
    fn test_parse_showhdinfo_reordered_fails() {
        let reordered = SHOWHDINFO_OUTPUT.replacen("UUID:", "Accessible:", 1);
        assert!(parse_showhdinfo(&reordered).is_err());
    }

    #[test]
    fn test_parse_showhdinfo_missing_anchor_fails() {
        let truncated: String = SHOWHDINFO_OUTPUT.lines().take(7).collect::<Vec<_>>().join("\n");
        assert!(parse_showhdinfo(&truncated).is_err());
    }

    #[test]
    fn test_parse_showhdinfo_bad_field_charset_fails() {
        let bad = SHOWHDINFO_OUTPUT.replace("yes", "yes!");
        assert!(parse_showhdinfo(&bad).is_err());
    }

    #[test]
    fn test_parse_createhd() {
        let uuid = parse_createhd(
            "Disk image created. UUID: e0bfd47f-5a29-4c5e-b325-79c4d032a02f",
        )
        .unwrap();
        assert_eq!(uuid, "e0bfd47f-5a29-4c5e-b325-79c4d032a02f");

        let uuid = parse_createhd(
            "Disk image created. UUID: 00bfd47f-5a29-4c5e-b325-79c4d032a02f\n",
        )
        .unwrap();
        assert_eq!(uuid, "00bfd47f-5a29-4c5e-b325-79c4d032a02f");
    }

    #[test]
    fn test_parse_createhd_malformed_fails() {
        assert!(parse_createhd("").is_err());
        assert!(parse_createhd("Disk image created.").is_err());
        assert!(parse_createhd("Disk image created. UUID: not-a-uuid").is_err());
        // wrong segment lengths
        assert!(parse_createhd("Disk image created. UUID: e0bfd47f-5a29-4c5e-b325-79c4").is_err());
    }

    #[test]
    fn test_parse_startvm() {
        let stdout = "\
Waiting for VM \"taco\" to power on...
VM \"taco\" has been successfully started.
";
        assert_eq!(parse_startvm(stdout).unwrap(), "taco");
    }

    #[test]
    fn test_parse_startvm_no_confirmation_fails() {
        assert!(parse_startvm("Waiting for VM \"taco\" to power on...\n").is_err());
        assert!(parse_startvm("").is_err());
    }

    #[test]
    fn test_parsers_are_pure() {
        assert_eq!(
            parse_createvm(CREATEVM_OUTPUT).unwrap(),
            parse_createvm(CREATEVM_OUTPUT).unwrap()
        );
        assert_eq!(
            parse_showhdinfo(SHOWHDINFO_OUTPUT).unwrap(),
            parse_showhdinfo(SHOWHDINFO_OUTPUT).unwrap()
        );
    }

    #[test]
    fn test_strip_outer_quotes_single_layer() {
        assert_eq!(strip_outer_quotes("\"\"x\"\""), "\"x\"");
        assert_eq!(strip_outer_quotes("\"x\""), "x");
        assert_eq!(strip_outer_quotes("x"), "x");
        assert_eq!(strip_outer_quotes("\""), "\"");
    }
}
