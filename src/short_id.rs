use sqids::Sqids;
use uuid::Uuid;

fn sqids_instance() -> Option<Sqids> {
    Sqids::builder().min_length(6).build().ok()
}

/// Short, reversible code for a game id, suitable for showing at the table.
pub fn uuid_to_short_id(uuid: Uuid) -> Option<String> {
    let bytes = uuid.as_bytes();
    let high = u64::from_be_bytes(bytes[0..8].try_into().ok()?);
    let low = u64::from_be_bytes(bytes[8..16].try_into().ok()?);
    sqids_instance()?.encode(&[high, low]).ok()
}

pub fn short_id_to_uuid(short_id: &str) -> Option<Uuid> {
    let nums = sqids_instance()?.decode(short_id);
    if nums.len() != 2 {
        return None;
    }
    let mut bytes = [0u8; 16];
    bytes[0..8].copy_from_slice(&nums[0].to_be_bytes());
    bytes[8..16].copy_from_slice(&nums[1].to_be_bytes());
    Some(Uuid::from_bytes(bytes))
}
