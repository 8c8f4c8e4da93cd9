use serde::{Deserialize, Serialize};

use crate::{Instance, InstanceError};

/// The external representation of an instance.
///
/// Field names follow the JSON instance files used by batch drivers. Sizes
/// are given as standard deviations and squared into variances when the
/// record is converted into an [`Instance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    #[serde(rename = "instanceID", default)]
    pub id: Option<String>,

    #[serde(rename = "expectedWeights")]
    pub means: Vec<f64>,

    #[serde(rename = "stdWeights")]
    pub std_devs: Vec<f64>,

    #[serde(rename = "expectedValues")]
    pub revenues: Vec<f64>,

    pub capacity: f64,

    #[serde(rename = "shortageCost")]
    pub penalty: f64,
}

impl TryFrom<InstanceRecord> for Instance {
    type Error = InstanceError;

    fn try_from(record: InstanceRecord) -> Result<Self, Self::Error> {
        Self::try_from(&record)
    }
}

impl TryFrom<&InstanceRecord> for Instance {
    type Error = InstanceError;

    fn try_from(record: &InstanceRecord) -> Result<Self, Self::Error> {
        Instance::from_columns(
            &record.means,
            &record.std_devs,
            &record.revenues,
            record.capacity,
            record.penalty,
        )
    }
}
