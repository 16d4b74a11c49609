use std::fmt;

/// Visual treatment applied to the card face.
///
/// The discriminants are the tier indices shared with the GPU uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Rarity {
    Normal = 0,
    #[default]
    Holo = 1,
    Gold = 2,
    UltraRare = 3,
}

impl Rarity {
    /// Every tier in index order.
    pub const ALL: [Rarity; 4] = [
        Rarity::Normal,
        Rarity::Holo,
        Rarity::Gold,
        Rarity::UltraRare,
    ];

    /// Strict conversion from a tier index.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Rarity::Normal),
            1 => Some(Rarity::Holo),
            2 => Some(Rarity::Gold),
            3 => Some(Rarity::UltraRare),
            _ => None,
        }
    }

    /// Converts an untrusted tier index, falling back to [`Rarity::Normal`].
    ///
    /// Unknown values are a caller bug: debug builds log a warning, release
    /// builds clamp silently.
    pub fn from_index_lossy(index: i64) -> Self {
        match u32::try_from(index).ok().and_then(Self::from_index) {
            Some(rarity) => rarity,
            None => {
                if cfg!(debug_assertions) {
                    log::warn!("Unknown rarity tier {index}; falling back to Normal");
                }
                Rarity::Normal
            }
        }
    }

    /// Index used in uniform buffers.
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Human-readable name for UI labels.
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Normal => "Normal",
            Rarity::Holo => "Holo",
            Rarity::Gold => "Gold",
            Rarity::UltraRare => "Ultra Rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
