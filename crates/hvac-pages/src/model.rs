use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Equipment category derived from a SKU prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AC_Condenser")]
    AcCondenser,
    #[serde(rename = "HP_Condenser")]
    HpCondenser,
    #[serde(rename = "AirHandler_Standard")]
    AirHandlerStandard,
    #[serde(rename = "AirHandler_Wall")]
    AirHandlerWall,
    #[serde(rename = "Furnace_80AFUE")]
    Furnace80Afue,
    #[serde(rename = "Furnace_92AFUE")]
    Furnace92Afue,
    #[serde(rename = "Furnace_96AFUE")]
    Furnace96Afue,
    #[serde(rename = "Coil_Upflow")]
    CoilUpflow,
    #[serde(rename = "Coil_Horizontal")]
    CoilHorizontal,
    Thermostat,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::AcCondenser,
        Category::HpCondenser,
        Category::AirHandlerStandard,
        Category::AirHandlerWall,
        Category::Furnace80Afue,
        Category::Furnace92Afue,
        Category::Furnace96Afue,
        Category::CoilUpflow,
        Category::CoilHorizontal,
        Category::Thermostat,
        Category::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::AcCondenser => "AC_Condenser",
            Category::HpCondenser => "HP_Condenser",
            Category::AirHandlerStandard => "AirHandler_Standard",
            Category::AirHandlerWall => "AirHandler_Wall",
            Category::Furnace80Afue => "Furnace_80AFUE",
            Category::Furnace92Afue => "Furnace_92AFUE",
            Category::Furnace96Afue => "Furnace_96AFUE",
            Category::CoilUpflow => "Coil_Upflow",
            Category::CoilHorizontal => "Coil_Horizontal",
            Category::Thermostat => "Thermostat",
            Category::Unknown => "Unknown",
        }
    }

    pub fn condenser(self) -> Option<Condenser> {
        match self {
            Category::AcCondenser => Some(Condenser::Ac),
            Category::HpCondenser => Some(Condenser::Hp),
            _ => None,
        }
    }

    pub fn afue(self) -> Option<Afue> {
        match self {
            Category::Furnace80Afue => Some(Afue::Eighty),
            Category::Furnace92Afue => Some(Afue::NinetyTwo),
            Category::Furnace96Afue => Some(Afue::NinetySix),
            _ => None,
        }
    }

    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Category::CoilUpflow => Some(Orientation::Upflow),
            Category::CoilHorizontal => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    pub fn is_air_handler(self) -> bool {
        matches!(self, Category::AirHandlerStandard | Category::AirHandlerWall)
    }

    /// Which spec layout applies; `None` for thermostats and unknowns.
    pub fn kind(self) -> Option<EquipmentKind> {
        match self {
            Category::AcCondenser => Some(EquipmentKind::AcCondenser),
            Category::HpCondenser => Some(EquipmentKind::HpCondenser),
            Category::AirHandlerStandard | Category::AirHandlerWall => {
                Some(EquipmentKind::AirHandler)
            }
            Category::Furnace80Afue | Category::Furnace92Afue | Category::Furnace96Afue => {
                Some(EquipmentKind::Furnace)
            }
            Category::CoilUpflow | Category::CoilHorizontal => Some(EquipmentKind::Coil),
            Category::Thermostat | Category::Unknown => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown category label: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condenser {
    Ac,
    Hp,
}

impl Condenser {
    pub fn tag(self) -> &'static str {
        match self {
            Condenser::Ac => "AC",
            Condenser::Hp => "HP",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Condenser::Ac => Category::AcCondenser,
            Condenser::Hp => Category::HpCondenser,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Afue {
    Eighty,
    NinetyTwo,
    NinetySix,
}

impl Afue {
    pub fn percent(self) -> u32 {
        match self {
            Afue::Eighty => 80,
            Afue::NinetyTwo => 92,
            Afue::NinetySix => 96,
        }
    }

    /// `80AFUE`, as used in labels and filenames.
    pub fn tag(self) -> String {
        format!("{}AFUE", self.percent())
    }

    pub fn category(self) -> Category {
        match self {
            Afue::Eighty => Category::Furnace80Afue,
            Afue::NinetyTwo => Category::Furnace92Afue,
            Afue::NinetySix => Category::Furnace96Afue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Upflow,
    Horizontal,
}

impl Orientation {
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Upflow => "Upflow",
            Orientation::Horizontal => "Horizontal",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Orientation::Upflow => Category::CoilUpflow,
            Orientation::Horizontal => Category::CoilHorizontal,
        }
    }
}

/// Spec-table layout of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentKind {
    AcCondenser,
    HpCondenser,
    AirHandler,
    Furnace,
    Coil,
}

impl EquipmentKind {
    /// Best-effort detection from a record's free-text `equipment_type`.
    pub fn from_equipment_type(equipment_type: &str) -> Option<Self> {
        let t = equipment_type.to_ascii_lowercase();
        if t.contains("heat pump") {
            Some(EquipmentKind::HpCondenser)
        } else if t.contains("air handler") {
            Some(EquipmentKind::AirHandler)
        } else if t.contains("furnace") {
            Some(EquipmentKind::Furnace)
        } else if t.contains("coil") {
            Some(EquipmentKind::Coil)
        } else if t.contains("air condition") || t.contains("condens") {
            Some(EquipmentKind::AcCondenser)
        } else {
            None
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            EquipmentKind::AcCondenser => "Air Conditioner",
            EquipmentKind::HpCondenser => "Heat Pump",
            EquipmentKind::AirHandler => "Air Handler",
            EquipmentKind::Furnace => "Gas Furnace",
            EquipmentKind::Coil => "Evaporator Coil",
        }
    }

    pub fn tab_id(self) -> &'static str {
        match self {
            EquipmentKind::AcCondenser => "ac-specs",
            EquipmentKind::HpCondenser => "hp-specs",
            EquipmentKind::AirHandler => "airhandler-specs",
            EquipmentKind::Furnace => "furnace-specs",
            EquipmentKind::Coil => "coil-specs",
        }
    }

    /// Fallback for the Product Type row.
    pub fn product_type(self) -> &'static str {
        match self {
            EquipmentKind::AcCondenser => "Air Conditioner Condenser",
            EquipmentKind::HpCondenser => "Heat Pump Condenser",
            EquipmentKind::AirHandler => "Air Handler",
            EquipmentKind::Furnace => "Gas Furnace",
            EquipmentKind::Coil => "Evaporator Coil",
        }
    }
}

/// System configuration derived from the ordered categories of one SKU group.
///
/// Never stored; always recomputed from the categories. `label()` renders the
/// historical label strings and `FromStr` parses them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemType {
    Single(Category),
    CondenserAirHandler {
        condenser: Condenser,
        wall: bool,
    },
    CondenserCoil {
        condenser: Condenser,
        orientation: Orientation,
    },
    FurnaceCoil {
        afue: Afue,
        orientation: Orientation,
    },
    CondenserFurnaceCoil {
        condenser: Condenser,
        afue: Afue,
        orientation: Orientation,
    },
    /// Two or three components with no dedicated layout; empty means `Unknown`.
    Composite(Vec<Category>),
    MultiComponent,
}

impl SystemType {
    /// Derive the system type. Thermostats are ignored.
    pub fn from_categories(categories: &[Category]) -> Self {
        let cats: Vec<Category> = categories
            .iter()
            .copied()
            .filter(|c| *c != Category::Thermostat)
            .collect();

        match cats.as_slice() {
            [] => SystemType::Composite(Vec::new()),
            [single] => SystemType::Single(*single),
            [a, b] => Self::pair(*a, *b).unwrap_or(SystemType::Composite(cats)),
            [a, b, c] => Self::triple(*a, *b, *c).unwrap_or(SystemType::Composite(cats)),
            _ => SystemType::MultiComponent,
        }
    }

    fn pair(a: Category, b: Category) -> Option<Self> {
        let both = [a, b];
        let condenser = both.iter().find_map(|c| c.condenser());
        let air_handler = both.into_iter().find(|c| c.is_air_handler());
        let afue = both.iter().find_map(|c| c.afue());
        let orientation = both.iter().find_map(|c| c.orientation());

        match (condenser, air_handler, afue, orientation) {
            (Some(condenser), Some(ah), None, None) => Some(SystemType::CondenserAirHandler {
                condenser,
                wall: ah == Category::AirHandlerWall,
            }),
            (Some(condenser), None, None, Some(orientation)) => Some(SystemType::CondenserCoil {
                condenser,
                orientation,
            }),
            (None, None, Some(afue), Some(orientation)) => {
                Some(SystemType::FurnaceCoil { afue, orientation })
            }
            _ => None,
        }
    }

    fn triple(a: Category, b: Category, c: Category) -> Option<Self> {
        let all = [a, b, c];
        let condenser = all.iter().find_map(|c| c.condenser())?;
        let afue = all.iter().find_map(|c| c.afue())?;
        let orientation = all.iter().find_map(|c| c.orientation())?;
        Some(SystemType::CondenserFurnaceCoil {
            condenser,
            afue,
            orientation,
        })
    }

    pub fn label(&self) -> String {
        match self {
            SystemType::Single(c) => format!("Single_{}", c.label()),
            SystemType::CondenserAirHandler { condenser, wall } => {
                let suffix = if *wall { "_Wall" } else { "" };
                format!("{}_AirHandler{suffix}", condenser.tag())
            }
            SystemType::CondenserCoil {
                condenser,
                orientation,
            } => format!("{}_Coil_{}", condenser.tag(), orientation.label()),
            SystemType::FurnaceCoil { afue, orientation } => {
                format!("Furnace_Coil_{}_{}", afue.tag(), orientation.label())
            }
            SystemType::CondenserFurnaceCoil {
                condenser,
                afue,
                orientation,
            } => {
                let dual = if *condenser == Condenser::Hp { "_DualFuel" } else { "" };
                format!(
                    "{}_Furnace_Coil_{}_{}{dual}",
                    condenser.tag(),
                    afue.tag(),
                    orientation.label()
                )
            }
            SystemType::Composite(cats) if cats.is_empty() => "Unknown".to_string(),
            SystemType::Composite(cats) => {
                let parts: Vec<&str> = cats.iter().map(|c| c.label()).collect();
                format!("System_{}Component_{}", cats.len(), parts.join("_"))
            }
            SystemType::MultiComponent => "Unknown_MultiComponent".to_string(),
        }
    }

    /// Category per component, in layout order. Empty for types without a
    /// fixed layout.
    pub fn categories(&self) -> Vec<Category> {
        match self {
            SystemType::Single(c) => vec![*c],
            SystemType::CondenserAirHandler { condenser, wall } => {
                let ah = if *wall {
                    Category::AirHandlerWall
                } else {
                    Category::AirHandlerStandard
                };
                vec![condenser.category(), ah]
            }
            SystemType::CondenserCoil {
                condenser,
                orientation,
            } => vec![condenser.category(), orientation.category()],
            SystemType::FurnaceCoil { afue, orientation } => {
                vec![afue.category(), orientation.category()]
            }
            SystemType::CondenserFurnaceCoil {
                condenser,
                afue,
                orientation,
            } => vec![condenser.category(), afue.category(), orientation.category()],
            SystemType::Composite(cats) => cats.clone(),
            SystemType::MultiComponent => Vec::new(),
        }
    }

    pub fn condenser(&self) -> Option<Condenser> {
        match self {
            SystemType::Single(c) => c.condenser(),
            SystemType::CondenserAirHandler { condenser, .. }
            | SystemType::CondenserCoil { condenser, .. }
            | SystemType::CondenserFurnaceCoil { condenser, .. } => Some(*condenser),
            _ => None,
        }
    }

    /// Whether a page layout exists for this type.
    pub fn is_renderable(&self) -> bool {
        match self {
            SystemType::Single(c) => c.kind().is_some(),
            SystemType::Composite(_) | SystemType::MultiComponent => false,
            _ => true,
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for SystemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid system type label: {s}");

        match s {
            "Unknown" => return Ok(SystemType::Composite(Vec::new())),
            "Unknown_MultiComponent" => return Ok(SystemType::MultiComponent),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("Single_") {
            return rest.parse().map(SystemType::Single).map_err(|_| invalid());
        }

        for (prefix, count) in [("System_2Component_", 2), ("System_3Component_", 3)] {
            if let Some(rest) = s.strip_prefix(prefix) {
                let cats = split_category_labels(rest).ok_or_else(invalid)?;
                if cats.len() != count {
                    return Err(invalid());
                }
                return Ok(SystemType::Composite(cats));
            }
        }

        // Structured labels round-trip through `from_categories`.
        let (head, dual_fuel) = match s.strip_suffix("_DualFuel") {
            Some(head) => (head, true),
            None => (s, false),
        };
        let tokens: Vec<&str> = head.split('_').collect();
        let condenser = |t: &str| match t {
            "AC" => Some(Condenser::Ac),
            "HP" => Some(Condenser::Hp),
            _ => None,
        };
        let orientation = |t: &str| match t {
            "Upflow" => Some(Orientation::Upflow),
            "Horizontal" => Some(Orientation::Horizontal),
            _ => None,
        };
        let afue = |t: &str| match t {
            "80AFUE" => Some(Afue::Eighty),
            "92AFUE" => Some(Afue::NinetyTwo),
            "96AFUE" => Some(Afue::NinetySix),
            _ => None,
        };

        let parsed = match tokens.as_slice() {
            [c, "AirHandler"] => condenser(*c).map(|condenser| SystemType::CondenserAirHandler {
                condenser,
                wall: false,
            }),
            [c, "AirHandler", "Wall"] => {
                condenser(*c).map(|condenser| SystemType::CondenserAirHandler {
                    condenser,
                    wall: true,
                })
            }
            [c, "Coil", o] => condenser(*c).zip(orientation(*o)).map(|(condenser, orientation)| {
                SystemType::CondenserCoil {
                    condenser,
                    orientation,
                }
            }),
            ["Furnace", "Coil", a, o] => afue(*a)
                .zip(orientation(*o))
                .map(|(afue, orientation)| SystemType::FurnaceCoil { afue, orientation }),
            [c, "Furnace", "Coil", a, o] => condenser(*c).and_then(|condenser| {
                Some(SystemType::CondenserFurnaceCoil {
                    condenser,
                    afue: afue(*a)?,
                    orientation: orientation(*o)?,
                })
            }),
            _ => None,
        };

        let parsed = parsed.ok_or_else(invalid)?;
        if dual_fuel != (matches!(parsed, SystemType::CondenserFurnaceCoil { .. })
            && parsed.condenser() == Some(Condenser::Hp))
        {
            return Err(invalid());
        }
        Ok(parsed)
    }
}

/// Split `AC_Condenser_Coil_Upflow` back into category labels.
fn split_category_labels(mut rest: &str) -> Option<Vec<Category>> {
    let mut cats = Vec::new();
    while !rest.is_empty() {
        let category = Category::ALL.into_iter().find(|c| {
            rest.strip_prefix(c.label())
                .is_some_and(|tail| tail.is_empty() || tail.starts_with('_'))
        })?;
        rest = rest[category.label().len()..].trim_start_matches('_');
        cats.push(category);
    }
    Some(cats)
}

/// One line of the SKU list: a comma-separated group of SKUs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuEntry {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Original line text, trimmed.
    pub raw: String,
    pub skus: Vec<String>,
}

/// A labelled value in a component's spec table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub label: String,
    pub value: String,
}

impl SpecRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A finished page, ready to write.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub filename: String,
    pub html: String,
    pub system_type: SystemType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_air_handler_variant() {
        let st = SystemType::from_categories(&[Category::AcCondenser, Category::AirHandlerWall]);
        assert_eq!(st.label(), "AC_AirHandler_Wall");
    }

    #[test]
    fn test_dual_fuel_label() {
        let st = SystemType::from_categories(&[
            Category::HpCondenser,
            Category::Furnace80Afue,
            Category::CoilUpflow,
        ]);
        let label = st.label();
        assert_eq!(label, "HP_Furnace_Coil_80AFUE_Upflow_DualFuel");
        assert!(label.contains("DualFuel") && label.contains("80AFUE") && label.contains("Upflow"));
    }

    #[test]
    fn test_pair_order_does_not_matter() {
        let a = SystemType::from_categories(&[Category::CoilHorizontal, Category::Furnace92Afue]);
        assert_eq!(a.label(), "Furnace_Coil_92AFUE_Horizontal");
        let b = SystemType::from_categories(&[Category::AirHandlerStandard, Category::HpCondenser]);
        assert_eq!(b.label(), "HP_AirHandler");
    }

    #[test]
    fn test_fallback_labels() {
        assert_eq!(SystemType::from_categories(&[]).label(), "Unknown");
        assert_eq!(
            SystemType::from_categories(&[Category::Thermostat]).label(),
            "Unknown"
        );
        assert_eq!(
            SystemType::from_categories(&[Category::AcCondenser]).label(),
            "Single_AC_Condenser"
        );
        assert_eq!(
            SystemType::from_categories(&[Category::AcCondenser, Category::Furnace80Afue]).label(),
            "System_2Component_AC_Condenser_Furnace_80AFUE"
        );
        assert_eq!(
            SystemType::from_categories(&[
                Category::AcCondenser,
                Category::AirHandlerStandard,
                Category::CoilUpflow,
            ])
            .label(),
            "System_3Component_AC_Condenser_AirHandler_Standard_Coil_Upflow"
        );
        assert_eq!(
            SystemType::from_categories(&[Category::AcCondenser; 4]).label(),
            "Unknown_MultiComponent"
        );
    }

    #[test]
    fn test_thermostats_are_filtered() {
        let st = SystemType::from_categories(&[
            Category::AcCondenser,
            Category::Thermostat,
            Category::AirHandlerStandard,
        ]);
        assert_eq!(st.label(), "AC_AirHandler");
    }

    #[test]
    fn test_labels_parse_back() {
        let cases = [
            vec![Category::AcCondenser],
            vec![Category::Unknown],
            vec![Category::HpCondenser, Category::AirHandlerWall],
            vec![Category::AcCondenser, Category::CoilHorizontal],
            vec![Category::Furnace96Afue, Category::CoilUpflow],
            vec![Category::AcCondenser, Category::Furnace92Afue, Category::CoilHorizontal],
            vec![Category::HpCondenser, Category::Furnace80Afue, Category::CoilUpflow],
            vec![Category::AirHandlerWall, Category::CoilUpflow],
            vec![],
            vec![Category::AcCondenser; 5],
        ];
        for cats in cases {
            let st = SystemType::from_categories(&cats);
            let parsed: SystemType = st.label().parse().expect("label parses");
            assert_eq!(parsed, st, "round trip of {}", st.label());
        }
    }

    #[test]
    fn test_invalid_labels_rejected() {
        assert!("AC_Furnace_Coil_80AFUE_Upflow_DualFuel".parse::<SystemType>().is_err());
        assert!("Single_Boiler".parse::<SystemType>().is_err());
        assert!("System_2Component_AC_Condenser".parse::<SystemType>().is_err());
    }

    #[test]
    fn test_renderable_types() {
        assert!(SystemType::Single(Category::CoilUpflow).is_renderable());
        assert!(!SystemType::Single(Category::Unknown).is_renderable());
        assert!(!SystemType::Single(Category::Thermostat).is_renderable());
        assert!(!SystemType::MultiComponent.is_renderable());
    }

    #[test]
    fn test_equipment_kind_detection() {
        assert_eq!(
            EquipmentKind::from_equipment_type("Split System Heat Pump"),
            Some(EquipmentKind::HpCondenser)
        );
        assert_eq!(
            EquipmentKind::from_equipment_type("Upflow Cased Evaporator Coil"),
            Some(EquipmentKind::Coil)
        );
        assert_eq!(EquipmentKind::from_equipment_type("Thermostat"), None);
    }
}
