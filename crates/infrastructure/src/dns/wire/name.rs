use super::MAX_POINTER_OFFSET;
use iterdns_domain::domain_name::normalize;
use iterdns_domain::DomainError;
use std::collections::HashMap;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;
const POINTER_TAG: u8 = 0xC0;

/// Suffix (lowercased, dot-terminated) to the byte offset where it was first
/// written in the current message.
pub(super) type CompressionTable = HashMap<String, u16>;

/// Decodes the name at `*pos`, advancing `*pos` past its in-place encoding
/// (up to and including the first pointer, if any).
///
/// Every pointer must target an offset strictly before the segment it
/// interrupts, so decoding always terminates.
pub(super) fn read_name(buf: &[u8], pos: &mut usize) -> Result<String, DomainError> {
    let mut name = String::new();
    let mut cursor = *pos;
    let mut segment_start = cursor;
    let mut resume_at = None;

    loop {
        let len = *buf
            .get(cursor)
            .ok_or_else(|| DomainError::malformed("name runs past end of message"))?;

        match len & POINTER_TAG {
            0x00 if len == 0 => {
                cursor += 1;
                break;
            }
            0x00 => {
                let start = cursor + 1;
                let end = start + usize::from(len);
                let label = buf
                    .get(start..end)
                    .ok_or_else(|| DomainError::malformed("label runs past end of message"))?;

                if label.contains(&b'.') {
                    return Err(DomainError::malformed(format!(
                        "label at {} contains a '.' byte",
                        cursor
                    )));
                }
                let label = std::str::from_utf8(label).map_err(|_| {
                    DomainError::malformed(format!("label at {} is not valid UTF-8", cursor))
                })?;

                name.push_str(label);
                name.push('.');
                if name.len() > MAX_NAME_LEN {
                    return Err(DomainError::malformed("name exceeds 255 bytes"));
                }
                cursor = end;
            }
            POINTER_TAG => {
                let low = *buf
                    .get(cursor + 1)
                    .ok_or_else(|| DomainError::malformed("truncated compression pointer"))?;
                let target = (usize::from(len & 0x3F) << 8) | usize::from(low);

                if target >= segment_start {
                    return Err(DomainError::malformed(format!(
                        "compression pointer at {} targets {} which does not precede it",
                        cursor, target
                    )));
                }

                if resume_at.is_none() {
                    resume_at = Some(cursor + 2);
                }
                segment_start = target;
                cursor = target;
            }
            _ => {
                return Err(DomainError::malformed(format!(
                    "unsupported label type 0x{:02x}",
                    len & POINTER_TAG
                )));
            }
        }
    }

    *pos = resume_at.unwrap_or(cursor);

    if name.is_empty() {
        name.push('.');
    }
    Ok(name)
}

/// Appends `name` to `out`, reusing any suffix already present in `table`.
///
/// `out` must hold the message from its first byte, since offsets are
/// absolute.
pub(super) fn write_name(
    out: &mut Vec<u8>,
    name: &str,
    table: &mut CompressionTable,
) -> Result<(), DomainError> {
    let name = normalize(name);
    let Some(body) = name.strip_suffix('.').filter(|b| !b.is_empty()) else {
        out.push(0);
        return Ok(());
    };

    if name.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "{} exceeds 255 bytes",
            name
        )));
    }

    let labels: Vec<&str> = body.split('.').collect();
    for (i, label) in labels.iter().enumerate() {
        let suffix = format!("{}.", labels[i..].join(".")).to_ascii_lowercase();
        if let Some(&offset) = table.get(&suffix) {
            out.extend_from_slice(&(0xC000 | offset).to_be_bytes());
            return Ok(());
        }

        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "{}: labels must be 1-63 bytes",
                name
            )));
        }

        let offset = out.len();
        if offset <= MAX_POINTER_OFFSET {
            table.insert(suffix, offset as u16);
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }

    out.push(0);
    Ok(())
}
