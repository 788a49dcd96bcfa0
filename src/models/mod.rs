use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single judged division: the competitors in column order and one
/// scorecard per judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub competitors: Vec<String>,
    pub judges: Vec<JudgeCard>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// One judge's ordinals, index-aligned with `Competition::competitors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeCard {
    #[serde(default)]
    pub name: Option<String>,
    pub ranks: Vec<u32>,
}

/// A competitor's identity paired with its column in the rank matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub index: usize,
    pub name: String,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Competition {
    pub fn new(title: String, competitors: Vec<String>, judges: Vec<JudgeCard>) -> Self {
        Self {
            id: new_id(),
            title,
            competitors,
            judges,
            created_at: Utc::now(),
        }
    }

    /// Judge rows in judge order, ready for the ranking engine.
    pub fn rank_matrix(&self) -> Vec<Vec<u32>> {
        self.judges.iter().map(|card| card.ranks.clone()).collect()
    }

    /// Display label for the judge at `index`: its name, or `J1`, `J2`...
    pub fn judge_label(&self, index: usize) -> String {
        self.judges
            .get(index)
            .and_then(|card| card.name.clone())
            .unwrap_or_else(|| format!("J{}", index + 1))
    }

    pub fn judge_labels(&self) -> Vec<String> {
        (0..self.judges.len()).map(|i| self.judge_label(i)).collect()
    }
}

impl Competitor {
    /// Pairs each name with its position in the list.
    pub fn roster(names: &[String]) -> Vec<Competitor> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Competitor {
                index,
                name: name.clone(),
            })
            .collect()
    }
}
