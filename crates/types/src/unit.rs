use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A document measurement unit, stored as points per unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit(f32);

impl Unit {
    pub const POINT: Unit = Unit(1.0);
    pub const MILLIMETER: Unit = Unit(72.0 / 25.4);
    pub const CENTIMETER: Unit = Unit(72.0 / 2.54);
    pub const INCH: Unit = Unit(72.0);

    pub fn points_per_unit(self) -> f32 {
        self.0
    }

    pub fn to_pt(self, value: f32) -> f32 {
        value * self.0
    }

    pub fn from_pt(self, value: f32) -> f32 {
        value / self.0
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "pt" => Ok(Unit::POINT),
            "mm" => Ok(Unit::MILLIMETER),
            "cm" => Ok(Unit::CENTIMETER),
            "in" | "inch" => Ok(Unit::INCH),
            other => Err(format!("Unknown measurement unit: '{}'", other)),
        }
    }

    fn name(self) -> Option<&'static str> {
        [
            (Unit::POINT, "pt"),
            (Unit::MILLIMETER, "mm"),
            (Unit::CENTIMETER, "cm"),
            (Unit::INCH, "in"),
        ]
        .into_iter()
        .find(|(unit, _)| *unit == self)
        .map(|(_, name)| name)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::MILLIMETER
    }
}

impl Serialize for Unit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_f32(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum UnitDef {
            Name(String),
            Points(f32),
        }

        match UnitDef::deserialize(deserializer)? {
            UnitDef::Name(name) => Unit::parse(&name).map_err(de::Error::custom),
            UnitDef::Points(points) if points > 0.0 => Ok(Unit(points)),
            UnitDef::Points(points) => Err(de::Error::custom(format!(
                "Unit must be a positive number of points, got {}",
                points
            ))),
        }
    }
}
