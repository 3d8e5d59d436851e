use crate::codec::EnumCodec;
use crate::enum_codec_serde;

const LOSS_BIT: u8 = 0b0100;

/// How a match ended, from one player's point of view.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum TerminalStatus {
    #[default]
    Unknown = 0,
    VictoryDestruction = 1,
    VictoryExtinction = 2,
    VictoryResignation = 3,
    DelayOfGame = 4,
    LossDestruction = 5,
    LossExtinction = 6,
    LossResignation = 7,
}

impl TerminalStatus {
    /// The same ending seen by the other side.
    pub fn opposing(self) -> Self {
        match self {
            Self::Unknown | Self::DelayOfGame => self,
            _ => Self::from_repr(self as u8 ^ LOSS_BIT).unwrap_or_default(),
        }
    }

    pub const fn is_victory(self) -> bool {
        matches!(
            self,
            Self::VictoryDestruction | Self::VictoryExtinction | Self::VictoryResignation
        )
    }

    /// Lifts a legacy game status (0 in progress, 1 destruction,
    /// 2 extinction, 3 forfeit) to the winner's point of view.
    pub const fn from_legacy(status: i64) -> Option<Self> {
        match status {
            0 => Some(Self::Unknown),
            1 => Some(Self::VictoryDestruction),
            2 => Some(Self::VictoryExtinction),
            3 => Some(Self::VictoryResignation),
            _ => None,
        }
    }
}

impl EnumCodec for TerminalStatus {
    const KIND: &'static str = "terminal status";

    fn from_int(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_repr)
    }

    fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

enum_codec_serde!(TerminalStatus);
