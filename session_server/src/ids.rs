use rand::Rng;

const ID_LENGTH: usize = 12;
const ID_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random 12-character player id from `[0-9A-Z]`
pub fn player_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

pub fn session_id() -> String {
    format!("game{}", player_id())
}

pub fn computer_id(n: u64) -> String {
    format!("comp{n}")
}
