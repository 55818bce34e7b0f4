//! Parsed, normalized, and emitted record types.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::types::{AreaToken, Callsign};

/// Tag name → value mapping produced from one raw record.
///
/// Keys are upper-cased and trimmed; values are trimmed.
pub type ParsedRecord = HashMap<String, String>;

/// The fixed set of ADIF tags every [`NormalizedRecord`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// `QSO_DATE`, contact date as logged (`YYYYMMDD`).
    QsoDate,
    /// `FREQ`, frequency in MHz as logged.
    Freq,
    /// `STATION_CALLSIGN`, callsign used on the air by the logging station.
    StationCallsign,
    /// `OPERATOR`, callsign of the person operating the logging station.
    Operator,
    /// `CALL`, callsign of the contacted station.
    Call,
    /// `STX_STRING`, sent contest exchange.
    StxString,
    /// `SRX_STRING`, received contest exchange.
    SrxString,
    /// `COMMENT`, free text.
    Comment,
}

impl Field {
    /// All fields in schema order.
    pub const ALL: [Field; 8] = [
        Field::QsoDate,
        Field::Freq,
        Field::StationCallsign,
        Field::Operator,
        Field::Call,
        Field::StxString,
        Field::SrxString,
        Field::Comment,
    ];

    /// Fields scanned for an area token, in scan order.
    pub const AREA_CANDIDATES: [Field; 3] = [Field::StxString, Field::SrxString, Field::Comment];

    /// ADIF tag name of this field.
    pub fn tag(self) -> &'static str {
        match self {
            Field::QsoDate => "QSO_DATE",
            Field::Freq => "FREQ",
            Field::StationCallsign => "STATION_CALLSIGN",
            Field::Operator => "OPERATOR",
            Field::Call => "CALL",
            Field::StxString => "STX_STRING",
            Field::SrxString => "SRX_STRING",
            Field::Comment => "COMMENT",
        }
    }
}

/// Fixed-schema view of one contact. Every field is always present and
/// defaults to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedRecord {
    qso_date: String,
    freq: String,
    station_callsign: String,
    operator: String,
    call: String,
    stx_string: String,
    srx_string: String,
    comment: String,
}

impl NormalizedRecord {
    /// Builds a record from a parsed tag map, substituting `""` for every
    /// missing field.
    pub fn from_parsed(parsed: &ParsedRecord) -> Self {
        let take = |field: Field| parsed.get(field.tag()).cloned().unwrap_or_default();
        Self {
            qso_date: take(Field::QsoDate),
            freq: take(Field::Freq),
            station_callsign: take(Field::StationCallsign),
            operator: take(Field::Operator),
            call: take(Field::Call),
            stx_string: take(Field::StxString),
            srx_string: take(Field::SrxString),
            comment: take(Field::Comment),
        }
    }

    /// Value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::QsoDate => &self.qso_date,
            Field::Freq => &self.freq,
            Field::StationCallsign => &self.station_callsign,
            Field::Operator => &self.operator,
            Field::Call => &self.call,
            Field::StxString => &self.stx_string,
            Field::SrxString => &self.srx_string,
            Field::Comment => &self.comment,
        }
    }

    /// Contact date.
    pub fn qso_date(&self) -> &str {
        &self.qso_date
    }

    /// Logged frequency text.
    pub fn freq(&self) -> &str {
        &self.freq
    }

    /// Logging station's on-air callsign.
    pub fn station_callsign(&self) -> &str {
        &self.station_callsign
    }

    /// Logging station's operator callsign.
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Contacted station's callsign.
    pub fn call(&self) -> &str {
        &self.call
    }

    /// Sent exchange.
    pub fn stx_string(&self) -> &str {
        &self.stx_string
    }

    /// Received exchange.
    pub fn srx_string(&self) -> &str {
        &self.srx_string
    }

    /// Free-text comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Converts back into a tag map holding all eight fields.
    pub fn to_parsed(&self) -> ParsedRecord {
        Field::ALL
            .iter()
            .map(|field| (field.tag().to_string(), self.get(*field).to_string()))
            .collect()
    }
}

/// One (contact, area) hit handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputEntry {
    /// `QSO_DATE` of the contact.
    pub date: String,
    /// `FREQ` of the contact, verbatim.
    pub freq: String,
    /// Configured spotter when it is one of the logging roles, else empty.
    pub spotter: Callsign,
    /// Contacted station (`CALL`).
    pub dx: Callsign,
    /// Matched area token.
    pub area: AreaToken,
}

impl OutputEntry {
    /// Frequency in MHz, when the logged text is a number.
    pub fn freq_mhz(&self) -> Option<f64> {
        self.freq.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

