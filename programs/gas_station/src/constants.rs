use anchor_lang::prelude::*;

#[constant]
pub const CFG_SEED: &[u8] = b"cfg";
#[constant]
pub const QUOTA_SEED: &[u8] = b"quota";
#[constant]
pub const CREDITS_SEED: &[u8] = b"credits";

#[constant]
pub const SECONDS_PER_DAY: u64 = 86_400;
