//! Host state chunk framing.
//!
//! Layout: `magic: u32 LE | payload_len: u32 LE | payload`, where the payload
//! is the UTF-8 XML document followed by one NUL byte.

use crate::service::task_list::TaskListModel;
use crate::state::codec::{decode_xml, encode_xml, DecodedState};
use crate::state::{StateError, StateResult};

const BLOB_MAGIC: u32 = 0x2132_4356;
const HEADER_LEN: usize = 8;

/// Serializes the model into a framed host state chunk.
pub fn encode_blob(model: &TaskListModel) -> StateResult<Vec<u8>> {
    let xml = encode_xml(model)?;
    let payload_len = u32::try_from(xml.len() + 1)
        .map_err(|_| StateError::Write("state document exceeds 4 GiB".to_string()))?;

    let mut data = Vec::with_capacity(HEADER_LEN + xml.len() + 1);
    data.extend_from_slice(&BLOB_MAGIC.to_le_bytes());
    data.extend_from_slice(&payload_len.to_le_bytes());
    data.extend_from_slice(xml.as_bytes());
    data.push(0);
    Ok(data)
}

/// Decodes a framed chunk, or bare XML text when no frame header is present.
pub fn decode_blob(data: &[u8]) -> StateResult<DecodedState> {
    if data.is_empty() {
        return Err(StateError::Empty);
    }

    let payload = match unframe(data)? {
        Some(payload) => payload,
        None => data,
    };
    let end = payload
        .iter()
        .rposition(|byte| *byte != 0)
        .map(|last| last + 1)
        .unwrap_or(0);
    let text = std::str::from_utf8(&payload[..end])
        .map_err(|err| StateError::Malformed(err.to_string()))?;

    decode_xml(text)
}

fn unframe(data: &[u8]) -> StateResult<Option<&[u8]>> {
    if data.len() < HEADER_LEN {
        return Ok(None);
    }
    let (header, rest) = data.split_at(HEADER_LEN);
    let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    if magic != BLOB_MAGIC {
        return Ok(None);
    }

    let declared = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    if declared > rest.len() {
        return Err(StateError::Truncated {
            declared,
            available: rest.len(),
        });
    }
    Ok(Some(&rest[..declared]))
}

#[cfg(test)]
mod tests {
    use super::{decode_blob, encode_blob, BLOB_MAGIC, HEADER_LEN};
    use crate::service::task_list::TaskListModel;
    use crate::state::StateError;

    #[test]
    fn header_declares_payload_with_terminator() {
        let mut model = TaskListModel::new();
        model.add_task("Print lyric sheet");

        let data = encode_blob(&model).unwrap();

        assert_eq!(&data[..4], &BLOB_MAGIC.to_le_bytes());
        let declared = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
        assert_eq!(declared, data.len() - HEADER_LEN);
        assert_eq!(data.last(), Some(&0));
    }

    #[test]
    fn accepts_bare_xml_without_frame() {
        let decoded = decode_blob(br#"<Tasks nextTaskId="3"><Task id="2" text="b"/></Tasks>"#)
            .unwrap();
        assert_eq!(decoded.tasks.len(), 1);
        assert_eq!(decoded.next_task_id, 3);
    }

    #[test]
    fn rejects_empty_and_truncated_input() {
        assert_eq!(decode_blob(&[]).unwrap_err(), StateError::Empty);

        let mut model = TaskListModel::new();
        model.add_task("Check phase");
        let data = encode_blob(&model).unwrap();
        let cut = &data[..data.len() - 5];

        assert!(matches!(
            decode_blob(cut),
            Err(StateError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_invalid_utf8_payload() {
        let err = decode_blob(&[0xff, 0xfe, 0x3c]).unwrap_err();
        assert!(matches!(err, StateError::Malformed(_)));
    }
}
