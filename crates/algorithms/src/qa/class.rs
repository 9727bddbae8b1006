//! Level-2 scalar class band values

use lsqa_core::Error;

/// Classes of the scalar Level-2 QA band.
///
/// Mutually exclusive: each pixel carries exactly one class value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum QaClass {
    Clear = 0,
    Water = 1,
    CloudShadow = 2,
    Snow = 3,
    Cloud = 4,
    Fill = 255,
}

impl QaClass {
    /// The raw band value for this class
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for QaClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        let class = match value {
            0 => QaClass::Clear,
            1 => QaClass::Water,
            2 => QaClass::CloudShadow,
            3 => QaClass::Snow,
            4 => QaClass::Cloud,
            255 => QaClass::Fill,
            other => {
                return Err(Error::InvalidParameter {
                    name: "class",
                    value: other.to_string(),
                    reason: "class values are 0-4 and 255".to_string(),
                })
            }
        };
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_values() {
        assert_eq!(QaClass::Clear.value(), 0);
        assert_eq!(QaClass::Cloud.value(), 4);
        assert_eq!(QaClass::Fill.value(), 255);
    }

    #[test]
    fn test_class_from_u8() {
        assert_eq!(QaClass::try_from(2).unwrap(), QaClass::CloudShadow);
        assert_eq!(QaClass::try_from(255).unwrap(), QaClass::Fill);
        assert!(QaClass::try_from(5).is_err());
        assert!(QaClass::try_from(100).is_err());
    }
}
