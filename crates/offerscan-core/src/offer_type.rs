//! Education-type codes (`bart`) understood by the search API.

/// Known education-type codes. The search core passes the raw integer code
/// through, so codes missing here still work; this enum only gives the
/// common ones a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferType {
    GeneralEducation,
    PartialQualification,
    VocationalTraining,
    RegulatedFurtherTraining,
    FurtherTraining,
    SchoolLeavingCertificate,
    Rehabilitation,
    Retraining,
}

impl OfferType {
    pub const ALL: [OfferType; 8] = [
        OfferType::GeneralEducation,
        OfferType::PartialQualification,
        OfferType::VocationalTraining,
        OfferType::RegulatedFurtherTraining,
        OfferType::FurtherTraining,
        OfferType::SchoolLeavingCertificate,
        OfferType::Rehabilitation,
        OfferType::Retraining,
    ];

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            OfferType::GeneralEducation => 100,
            OfferType::PartialQualification => 101,
            OfferType::VocationalTraining => 102,
            OfferType::RegulatedFurtherTraining => 103,
            OfferType::FurtherTraining => 104,
            OfferType::SchoolLeavingCertificate => 105,
            OfferType::Rehabilitation => 106,
            OfferType::Retraining => 109,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Maps the website's `kat` tab index to the API code. The website only
    /// exposes four tabs.
    #[must_use]
    pub fn from_link_category(kat: &str) -> Option<Self> {
        match kat {
            "0" => Some(OfferType::VocationalTraining),
            "1" => Some(OfferType::Retraining),
            "2" => Some(OfferType::PartialQualification),
            "3" => Some(OfferType::SchoolLeavingCertificate),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OfferType::GeneralEducation => "Allgemeinbildung",
            OfferType::PartialQualification => "Teilqualifizierung",
            OfferType::VocationalTraining => "Berufsausbildung",
            OfferType::RegulatedFurtherTraining => {
                "Gesetzlich/gesetzesähnlich geregelte Fortbildung/Qualifizierung"
            }
            OfferType::FurtherTraining => "Fortbildung/Qualifizierung",
            OfferType::SchoolLeavingCertificate => "Abschluss nachholen",
            OfferType::Rehabilitation => "Rehabilitation",
            OfferType::Retraining => "Umschulung",
        }
    }
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.code(), self.label())
    }
}
