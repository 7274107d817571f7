pub const PREFIX: &[u8] = b"tokenpass";
pub const MINTER: &[u8] = b"minter";
pub const PRESET: &[u8] = b"preset";
pub const RECEIPT: &[u8] = b"receipt";
pub const ACTIVITY: &[u8] = b"activity";

// Group bookkeeping seeds, kept outside the protocol namespace so the
// records can migrate to the token-group extensions once those are live.
pub const GROUP: &[u8] = b"group";
pub const MEMBER: &[u8] = b"member";
pub const MANAGER: &[u8] = b"manager";

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MAX_IMAGE_URL_LEN: usize = 100;
pub const MAX_URI_LEN: usize = 100;
pub const MAX_METADATA_PAIR_LEN: usize = 15;

pub const MAX_LABEL_LEN: usize = 30;
pub const MAX_ENTRY_MESSAGE_LEN: usize = 120;
pub const MAX_ENTRY_URL_LEN: usize = 100;

pub const SECONDS_PER_DAY: i64 = 86_400;
