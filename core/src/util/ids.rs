// marketplace/src/util/ids.rs

use rand::Rng;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub(crate) fn to_base36(mut n: u64) -> String {
  if n == 0 {
    return "0".to_string();
  }
  let mut digits = Vec::with_capacity(13);
  while n > 0 {
    digits.push(BASE36_DIGITS[(n % 36) as usize]);
    n /= 36;
  }
  digits.reverse();
  // Only ASCII digits were pushed.
  String::from_utf8(digits).unwrap_or_default()
}

/// Short, locally unique id: base-36 millisecond timestamp followed by a
/// random base-36 suffix. Not suitable as a remote primary key.
pub fn generate_id() -> String {
  let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
  let suffix: u64 = rand::thread_rng().gen();
  format!("{}{}", to_base36(millis), to_base36(suffix))
}
