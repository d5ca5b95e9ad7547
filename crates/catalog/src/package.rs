use serde::{Deserialize, Serialize};

use staybook_core::{Entity, Money, PackageId};

/// An add-on charge bundle (meals, amenities) priced per participant per
/// night, independent of room selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    id: PackageId,
    /// Per-participant, per-night price in minor currency units.
    price: Money,
    includes_food: bool,
    #[serde(rename = "includesAC")]
    includes_ac: bool,
    name: String,
}

impl Package {
    pub fn new(
        id: PackageId,
        price: Money,
        includes_food: bool,
        includes_ac: bool,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            price,
            includes_food,
            includes_ac,
            name: name.into(),
        }
    }

    pub fn package_id(&self) -> PackageId {
        self.id
    }

    pub fn price_per_participant_night(&self) -> Money {
        self.price
    }

    pub fn includes_food(&self) -> bool {
        self.includes_food
    }

    pub fn includes_ac(&self) -> bool {
        self.includes_ac
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Package {
    type Id = PackageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
