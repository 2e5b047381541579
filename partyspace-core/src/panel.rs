//! Surveyed voter records and panel normalization.
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::party::{Affiliation, Position};

/// One row of the survey table as supplied by a loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVoterRecord {
    pub party: String,
    pub true_weight: f64,
    pub vote_likelihood: f64,
    pub econ_position: f64,
    pub social_position: f64,
    pub adherence_strength: f64,
}

/// A validated voter with a normalized resampling weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub econ_position: f64,
    pub social_position: f64,
    pub affiliation: Affiliation,
    pub adherence_strength: f64,
    pub combined_weight: f64,
}

impl RawVoterRecord {
    /// Decode a JSON array of survey rows without validating their values.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Parse`] when the document is malformed or a row
    /// is missing or mistypes a column.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, PanelError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Voter {
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.econ_position, self.social_position)
    }
}

/// Validated survey panel; combined weights sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoterPanel {
    voters: Vec<Voter>,
}

impl VoterPanel {
    /// Validate raw records, normalize their combined weights, and apply the
    /// population-wide social-axis shift.
    ///
    /// # Errors
    ///
    /// Returns a schema error for unknown party labels, non-finite coordinates,
    /// or adherence outside `[0, 1]`, and a weight error when any weight is
    /// negative or NaN or the combined total is not positive.
    pub fn from_records(
        records: &[RawVoterRecord],
        social_shift: f64,
    ) -> Result<Self, PanelError> {
        let mut voters = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            voters.push(validate_record(row, record, social_shift)?);
        }

        let total: f64 = voters.iter().map(|v| v.combined_weight).sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(PanelError::DegenerateWeightTotal {
                total,
                rows: voters.len(),
            });
        }
        for voter in &mut voters {
            voter.combined_weight /= total;
        }
        log::debug!("normalized panel of {} voters", voters.len());
        Ok(Self { voters })
    }

    /// Parse a JSON array of raw records and normalize it.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed or incomplete rows, plus any error
    /// raised by [`VoterPanel::from_records`].
    pub fn from_json(json: &str, social_shift: f64) -> Result<Self, PanelError> {
        let records = RawVoterRecord::parse_list(json)?;
        Self::from_records(&records, social_shift)
    }

    #[must_use]
    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.voters.iter().map(|v| v.combined_weight).sum()
    }
}

fn validate_record(
    row: usize,
    record: &RawVoterRecord,
    social_shift: f64,
) -> Result<Voter, PanelError> {
    let affiliation =
        Affiliation::parse(&record.party).ok_or_else(|| PanelError::UnknownParty {
            row,
            label: record.party.clone(),
        })?;

    for (field, value) in [
        ("econ_position", record.econ_position),
        ("social_position", record.social_position),
    ] {
        if !value.is_finite() {
            return Err(PanelError::NonFiniteCoordinate { row, field, value });
        }
    }

    if !crate::numbers::within(record.adherence_strength, 0.0, 1.0) {
        return Err(PanelError::AdherenceOutOfRange {
            row,
            value: record.adherence_strength,
        });
    }

    for (field, value) in [
        ("true_weight", record.true_weight),
        ("vote_likelihood", record.vote_likelihood),
    ] {
        if value.is_nan() || value < 0.0 {
            return Err(PanelError::InvalidWeight { row, field, value });
        }
    }

    Ok(Voter {
        econ_position: record.econ_position,
        social_position: record.social_position + social_shift,
        affiliation,
        adherence_strength: record.adherence_strength,
        combined_weight: record.true_weight * record.vote_likelihood,
    })
}
