//! Voice catalog for the SaluteSpeech synthesis API

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A SaluteSpeech synthetic voice persona
///
/// The provider identifies voices by short codes; callers pick them by their
/// published Russian names. Only these six voices exist; any other name is a
/// caller error, not a provider error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Voice {
    /// Наталья
    Natalya,
    /// Александра
    #[default]
    Alexandra,
    /// Борис
    Boris,
    /// Марфа
    Marfa,
    /// Тарас
    Taras,
    /// Сергей
    Sergey,
}

impl Voice {
    /// All recognized voices, in menu order
    pub const ALL: [Self; 6] = [
        Self::Natalya,
        Self::Alexandra,
        Self::Boris,
        Self::Marfa,
        Self::Taras,
        Self::Sergey,
    ];

    /// Published voice name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Natalya => "Наталья",
            Self::Alexandra => "Александра",
            Self::Boris => "Борис",
            Self::Marfa => "Марфа",
            Self::Taras => "Тарас",
            Self::Sergey => "Сергей",
        }
    }

    /// Provider-specific code sent to the synthesis endpoint
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Natalya => "Nec",
            Self::Alexandra => "Ost",
            Self::Boris => "Bys",
            Self::Marfa => "May",
            Self::Taras => "Tur",
            Self::Sergey => "Pon",
        }
    }

    /// Published names of all recognized voices
    #[must_use]
    pub fn names() -> [&'static str; 6] {
        Self::ALL.map(Self::name)
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Voice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|voice| voice.name() == s)
            .ok_or_else(|| Error::InvalidVoice {
                voice: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_voice_maps_to_its_provider_code() {
        let expected = [
            ("Наталья", "Nec"),
            ("Александра", "Ost"),
            ("Борис", "Bys"),
            ("Марфа", "May"),
            ("Тарас", "Tur"),
            ("Сергей", "Pon"),
        ];

        for (voice, (name, code)) in Voice::ALL.into_iter().zip(expected) {
            assert_eq!(voice.name(), name);
            assert_eq!(voice.code(), code);
        }
    }

    #[test]
    fn default_voice_is_alexandra() {
        assert_eq!(Voice::default(), Voice::Alexandra);
    }

    #[test]
    fn names_round_trip_through_parsing() {
        for voice in Voice::ALL {
            let parsed: Voice = voice.to_string().parse().unwrap();
            assert_eq!(parsed, voice);
        }
    }

    #[test]
    fn unknown_name_is_rejected_with_choices() {
        let err = "Робот".parse::<Voice>().unwrap_err();
        assert!(matches!(&err, Error::InvalidVoice { voice } if voice == "Робот"));

        // The message names the offending value and lists every valid choice
        let message = err.to_string();
        assert!(message.contains("Робот"));
        for name in Voice::names() {
            assert!(message.contains(name));
        }
    }

    #[test]
    fn parsing_is_exact_no_trimming_or_case_folding() {
        assert!(" Борис".parse::<Voice>().is_err());
        assert!("борис".parse::<Voice>().is_err());
        assert!("Bys".parse::<Voice>().is_err());
    }
}
