use anyhow::{bail, Context, Result};
use typed_builder::TypedBuilder;

use crate::io::RESET_VECTOR;

/// What the CPU does when it fetches an opcode missing from the opcode table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OpcodePolicy {
    /// Latch a `CpuError` and refuse to execute anything else.
    #[default]
    Halt,
    /// Log a warning, charge 4 cycles and carry on with the next byte.
    Nop,
}

impl std::str::FromStr for OpcodePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" | "stop" => Ok(OpcodePolicy::Halt),
            "nop" | "skip" => Ok(OpcodePolicy::Nop),
            other => bail!("unknown opcode policy '{other}' (expected 'halt' or 'nop')"),
        }
    }
}

/// Power-on configuration for a [`GameBoy`](crate::GameBoy).
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// PC after reset.
    #[builder(default = RESET_VECTOR)]
    pub entry_point: u16,
    /// SP after reset.
    #[builder(default = 0xFFFE)]
    pub stack_pointer: u16,
    /// Seed registers and I/O with the values the DMG boot ROM leaves behind.
    /// When false, everything except PC/SP starts zeroed.
    #[builder(default = true)]
    pub dmg_boot_state: bool,
    #[builder(default)]
    pub opcode_policy: OpcodePolicy,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GameBoyConfig {
    /// Build a configuration from the defaults, overridden by
    /// `TINYBOY_OPCODE_POLICY` and `TINYBOY_ENTRY_POINT` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(policy) = std::env::var("TINYBOY_OPCODE_POLICY") {
            config.opcode_policy = policy
                .parse()
                .context("invalid TINYBOY_OPCODE_POLICY")?;
        }

        if let Ok(entry) = std::env::var("TINYBOY_ENTRY_POINT") {
            config.entry_point = parse_hex_u16(&entry).context("invalid TINYBOY_ENTRY_POINT")?;
        }

        Ok(config)
    }
}

fn parse_hex_u16(value: &str) -> Result<u16> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u16::from_str_radix(digits, 16).with_context(|| format!("'{value}' is not a 16-bit hex value"))
}
