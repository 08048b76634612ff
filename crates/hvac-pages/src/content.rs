/// Page text: titles, intro paragraphs and per-component spec rows.
///
/// Rows follow a fixed order per equipment kind. A row either always appears
/// (rendering `N/A` when the field is missing) or is only emitted when the
/// field is present; which is which is part of each layout below.
use hvac_common::record::{format_number, SpecRecord};

use crate::format::{format_tonnage, format_value, NOT_AVAILABLE};
use crate::model::{Category, Condenser, EquipmentKind, Orientation, SpecRow, SystemType};

/// Brand and refrigerant shared by every page of a product line.
#[derive(Debug, Clone)]
pub struct Branding {
    pub brand: String,
    pub refrigerant: String,
}

#[derive(Debug, Clone)]
pub struct ContentAssembler {
    branding: Branding,
}

/// Tonnage of the first spec that carries one, in entry order.
pub fn system_tonnage(specs: &[SpecRecord]) -> Option<f64> {
    specs.iter().find_map(SpecRecord::tonnage)
}

impl ContentAssembler {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Refrigerant named by the first spec that carries one, else the product
    /// line's.
    pub fn refrigerant(&self, specs: &[SpecRecord]) -> String {
        specs
            .iter()
            .find_map(|s| s.text("refrigerant_type"))
            .unwrap_or_else(|| self.branding.refrigerant.clone())
    }

    pub fn title(&self, system_type: &SystemType, specs: &[SpecRecord], rating: f64) -> String {
        let tonnage = system_tonnage(specs).map(format_tonnage);
        let refrigerant = self.refrigerant(specs);

        if let SystemType::Single(category) = system_type {
            let model = specs.first().map(|s| s.model_number.as_str()).unwrap_or_default();
            return self.single_title(*category, tonnage.as_deref(), &refrigerant, model);
        }

        let category = match system_type {
            SystemType::CondenserFurnaceCoil {
                condenser: Condenser::Hp,
                ..
            } => "Dual Fuel Heat Pump",
            _ => match system_type.condenser() {
                Some(Condenser::Ac) => "Air Conditioning",
                Some(Condenser::Hp) => "Heat Pump",
                None => "HVAC",
            },
        };

        let brand = self.branding.brand.to_uppercase();
        let size = tonnage.map(|t| format!("{t} Ton ")).unwrap_or_default();
        let mut title = format!(
            "{brand} {size}{} SEER2 {refrigerant} {category} System",
            format_number(rating)
        );

        match system_type {
            SystemType::CondenserAirHandler { wall: true, .. } => {
                title.push_str(" with Wall-Hung Air Handler")
            }
            SystemType::CondenserAirHandler { wall: false, .. } => title.push_str(" with Air Handler"),
            SystemType::CondenserFurnaceCoil { orientation, .. }
            | SystemType::FurnaceCoil { orientation, .. } => {
                title.push_str(&format!(" with Gas Furnace and {} Coil", orientation.label()))
            }
            SystemType::CondenserCoil { orientation, .. } => {
                title.push_str(&format!(" with {} Evaporator Coil", orientation.label()))
            }
            _ => {}
        }

        title
    }

    fn single_title(
        &self,
        category: Category,
        tonnage: Option<&str>,
        refrigerant: &str,
        model: &str,
    ) -> String {
        let brand = &self.branding.brand;
        let size = tonnage.map(|t| format!("{t} Ton ")).unwrap_or_default();

        if let Some(afue) = category.afue() {
            return format!("{brand} {}% AFUE Gas Furnace - {model}", afue.percent());
        }

        let product = match category {
            Category::AcCondenser => "Air Conditioner Condenser".to_string(),
            Category::HpCondenser => "Heat Pump Condenser".to_string(),
            Category::AirHandlerWall => "Wall-Hung Air Handler".to_string(),
            Category::AirHandlerStandard => "Air Handler".to_string(),
            Category::CoilUpflow | Category::CoilHorizontal => {
                let orientation = category.orientation().map(Orientation::label).unwrap_or_default();
                format!("{orientation} Evaporator Coil")
            }
            _ => "HVAC Equipment".to_string(),
        };
        format!("{brand} {size}{refrigerant} {product} - {model}")
    }

    pub fn intro(&self, system_type: &SystemType, specs: &[SpecRecord], rating: f64) -> String {
        let brand = &self.branding.brand;
        let refrigerant = self.refrigerant(specs);
        let size = system_tonnage(specs)
            .map(|t| format!("{}-ton ", format_tonnage(t)))
            .unwrap_or_default();
        let rating = format_number(rating);

        match system_type {
            SystemType::CondenserAirHandler {
                condenser: Condenser::Ac,
                wall: true,
            } => format!(
                "Get dependable cooling with this complete {brand} {size}air conditioning system \
                 built around a space-saving wall-hung air handler. The {rating} SEER2 outdoor unit \
                 is matched to a wall-mounted indoor section with provision for electric heat, so \
                 the same compact installation covers winter heating as well. It runs on \
                 {refrigerant} refrigerant and suits homes where closet and floor space is tight."
            ),
            SystemType::CondenserAirHandler {
                condenser: Condenser::Ac,
                wall: false,
            } => format!(
                "This complete {brand} {size}air conditioning system pairs a {rating} SEER2 outdoor \
                 condensing unit with a matched indoor air handler. Built for quiet, reliable \
                 cooling, the system uses {refrigerant} refrigerant, and the air handler's \
                 multi-speed blower keeps airflow steady and efficient throughout the home."
            ),
            SystemType::CondenserAirHandler {
                condenser: Condenser::Hp,
                wall: true,
            } => format!(
                "Heat and cool year round with this complete {brand} {size}heat pump system and its \
                 space-saving wall-hung air handler. The {rating} SEER2 heat pump and wall-mounted \
                 indoor section work as a matched pair on {refrigerant} refrigerant, delivering \
                 efficient climate control without giving up floor space."
            ),
            SystemType::CondenserAirHandler {
                condenser: Condenser::Hp,
                wall: false,
            } => format!(
                "This complete {brand} {size}heat pump system matches a {rating} SEER2 outdoor unit \
                 with an indoor air handler, providing both heating and cooling from a single \
                 system. The pair runs on {refrigerant} refrigerant for consistent performance in \
                 every season, and the air handler's blower control keeps comfort even."
            ),
            SystemType::CondenserFurnaceCoil {
                condenser: Condenser::Hp,
                afue,
                orientation,
            } => format!(
                "This {brand} dual fuel system combines a {size}{rating} SEER2 heat pump with a \
                 {}% AFUE gas furnace for backup heat. The matched package includes a {} \
                 evaporator coil and uses {refrigerant} refrigerant. Heating switches between the \
                 heat pump and the furnace based on outdoor temperature, keeping the home \
                 comfortable while holding down operating costs.",
                afue.percent(),
                orientation.label().to_lowercase()
            ),
            SystemType::CondenserFurnaceCoil {
                condenser: Condenser::Ac,
                afue,
                orientation,
            } => format!(
                "This complete {brand} heating and cooling system combines a {size}{rating} SEER2 \
                 air conditioner with a {}% AFUE gas furnace and a matched {} evaporator coil. \
                 Running on {refrigerant} refrigerant, it delivers efficient cooling in summer and \
                 dependable gas heat when the weather turns cold.",
                afue.percent(),
                orientation.label().to_lowercase()
            ),
            SystemType::CondenserCoil {
                condenser,
                orientation,
            } => {
                let unit = match condenser {
                    Condenser::Ac => "air conditioner",
                    Condenser::Hp => "heat pump",
                };
                format!(
                    "This {brand} {size}split system pairs a {rating} SEER2 {unit} with a matched \
                     {} evaporator coil for installation on an existing furnace or air handler. \
                     The matched components run on {refrigerant} refrigerant and are sized to \
                     work together for rated efficiency.",
                    orientation.label().to_lowercase()
                )
            }
            SystemType::FurnaceCoil { afue, orientation } => format!(
                "This {brand} package combines a {}% AFUE gas furnace with a matched {} \
                 evaporator coil, ready to pair with a {rating} SEER2 {refrigerant} outdoor unit \
                 for complete heating and cooling.",
                afue.percent(),
                orientation.label().to_lowercase()
            ),
            SystemType::Single(category) => self.single_intro(*category, &size, &rating, &refrigerant),
            _ => format!(
                "This {brand} HVAC system delivers high-efficiency performance with a {rating} \
                 SEER2 rating and {refrigerant} refrigerant, designed for reliable comfort and \
                 energy savings."
            ),
        }
    }

    fn single_intro(&self, category: Category, size: &str, rating: &str, refrigerant: &str) -> String {
        let brand = &self.branding.brand;
        match category {
            Category::AcCondenser => format!(
                "This {brand} {size}air conditioner condenser delivers {rating} SEER2 cooling \
                 efficiency on {refrigerant} refrigerant. Pair it with a matched air handler or \
                 furnace and evaporator coil for a complete system."
            ),
            Category::HpCondenser => format!(
                "This {brand} {size}heat pump provides both heating and cooling at {rating} SEER2 \
                 efficiency using {refrigerant} refrigerant. Pair it with a matched air handler \
                 or a gas furnace for dual fuel operation."
            ),
            Category::AirHandlerStandard | Category::AirHandlerWall => format!(
                "This {brand} {size}air handler moves conditioned air through the home with an \
                 efficient blower motor and is built to match {rating} SEER2 {refrigerant} \
                 outdoor units."
            ),
            Category::CoilUpflow | Category::CoilHorizontal => {
                let orientation = category
                    .orientation()
                    .map(|o| o.label().to_lowercase())
                    .unwrap_or_default();
                format!(
                    "This {brand} {size}{orientation} evaporator coil is designed for {refrigerant} \
                     systems and pairs with {rating} SEER2 outdoor units and a matching furnace."
                )
            }
            _ => match category.afue() {
                Some(afue) => format!(
                    "This {brand} {}% AFUE gas furnace provides dependable heat and pairs with an \
                     evaporator coil and outdoor unit for year-round comfort.",
                    afue.percent()
                ),
                None => format!("This {brand} equipment is designed for {refrigerant} systems."),
            },
        }
    }

    /// Rows for a spec whose kind is taken from its `equipment_type` field.
    pub fn rows(&self, spec: &SpecRecord) -> Vec<SpecRow> {
        match spec.equipment_type().and_then(EquipmentKind::from_equipment_type) {
            Some(kind) => self.rows_as(spec, kind),
            None => RowBuilder::new(spec).head(&self.branding, None).finish(),
        }
    }

    pub fn rows_as(&self, spec: &SpecRecord, kind: EquipmentKind) -> Vec<SpecRow> {
        let builder = RowBuilder::new(spec).head(&self.branding, Some(kind));
        let builder = match kind {
            EquipmentKind::AcCondenser | EquipmentKind::HpCondenser => builder.condenser(),
            EquipmentKind::AirHandler => builder.air_handler(),
            EquipmentKind::Furnace => builder.furnace(),
            EquipmentKind::Coil => builder.coil(),
        };
        builder.finish()
    }
}

/// Fill derived fields before row assembly. Present fields are never
/// overwritten, and line sizes and weights are never invented.
pub fn enrich(spec: &SpecRecord, category: Category) -> SpecRecord {
    let mut spec = spec.clone();
    let equipment_type = spec.equipment_type().unwrap_or_default().to_ascii_lowercase();

    match category.kind() {
        Some(EquipmentKind::Coil) => {
            if !spec.has("orientation") {
                let orientation = if equipment_type.contains("upflow") {
                    "Upflow"
                } else if equipment_type.contains("horizontal") {
                    "Horizontal"
                } else if equipment_type.contains("multi") {
                    "Multi-Position"
                } else {
                    category.orientation().map(Orientation::label).unwrap_or("Multi-Position")
                };
                spec.insert("orientation", orientation);
            }
            if !spec.has("metering_device") {
                spec.insert("metering_device", "TXV");
            }
        }
        Some(EquipmentKind::Furnace) => {
            if !spec.has("heating_stages") {
                if let Some(stages) = spec.number("stages") {
                    let text = match stages as i64 {
                        1 => "Single Stage".to_string(),
                        2 => "Two Stage".to_string(),
                        _ => format!("{} Stage", format_number(stages)),
                    };
                    spec.insert("heating_stages", text);
                }
            }
            if !spec.has("afue") {
                let from_type = [96, 92, 80]
                    .into_iter()
                    .find(|p| equipment_type.contains(&p.to_string()));
                let afue = from_type.or_else(|| category.afue().map(|a| a.percent() as i32));
                if let Some(afue) = afue {
                    spec.insert("afue", afue as i64);
                }
            }
            if !spec.has("blower_motor_type") {
                let motor = if equipment_type.contains("variable") || equipment_type.contains("ecm") {
                    "Variable Speed ECM"
                } else {
                    "Multi-Speed ECM"
                };
                spec.insert("blower_motor_type", motor);
            }
        }
        _ => {}
    }

    spec
}

struct RowBuilder<'a> {
    spec: &'a SpecRecord,
    rows: Vec<SpecRow>,
}

impl<'a> RowBuilder<'a> {
    fn new(spec: &'a SpecRecord) -> Self {
        Self {
            spec,
            rows: Vec::new(),
        }
    }

    fn finish(self) -> Vec<SpecRow> {
        self.rows
    }

    fn push(&mut self, label: &str, value: String) {
        self.rows.push(SpecRow::new(label, value));
    }

    /// First present field among `fields`, formatted by its own name.
    fn lookup(&self, fields: &[&str]) -> Option<String> {
        fields
            .iter()
            .find_map(|f| self.spec.get(f).map(|v| format_value(f, v)))
    }

    fn always(mut self, label: &str, fields: &[&str]) -> Self {
        let value = self.lookup(fields).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        self.push(label, value);
        self
    }

    fn when_present(mut self, label: &str, field: &str) -> Self {
        if let Some(value) = self.lookup(&[field]) {
            self.push(label, value);
        }
        self
    }

    fn head(mut self, branding: &Branding, kind: Option<EquipmentKind>) -> Self {
        let spec = self.spec;
        let manufacturer = spec.text("brand").unwrap_or_else(|| branding.brand.clone());
        self.push("Manufacturer", manufacturer);
        if let Some(tons) = spec.tonnage() {
            self.push("Tonnage", format!("{} Ton", format_tonnage(tons)));
        }
        let refrigerant = spec
            .text("refrigerant_type")
            .unwrap_or_else(|| branding.refrigerant.clone());
        self.push("Refrigerant", refrigerant);
        self.push("SKU/Model No", spec.model_number.clone());
        let product_type = spec
            .equipment_type()
            .map(str::to_string)
            .or_else(|| kind.map(|k| k.product_type().to_string()))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        self.push("Product Type", product_type);
        self
    }

    fn voltage(mut self, with_phase: bool) -> Self {
        let value = match self.spec.number("voltage") {
            Some(v) if with_phase => {
                format!("{}V / {}", format_number(v), self.phase_and_frequency())
            }
            Some(v) => format!("{}V", format_number(v)),
            // Dual ratings such as `208/230` stay text.
            None => match self
                .spec
                .text("voltage")
                .map(|v| v.trim_end_matches(['V', 'v']).trim().to_string())
            {
                Some(v) if with_phase => format!("{v}V / {}", self.phase_and_frequency()),
                Some(v) => format!("{v}V"),
                None => NOT_AVAILABLE.to_string(),
            },
        };
        self.push("Voltage", value);
        self
    }

    fn phase_and_frequency(&self) -> String {
        let phase = self.spec.number("phase").unwrap_or(1.0);
        let freq = self.spec.number("frequency_hz").unwrap_or(60.0);
        format!("{}Ph / {}Hz", format_number(phase), format_number(freq))
    }

    fn dimensions(mut self) -> Self {
        let dims: Option<Vec<String>> = ["height_in", "width_in", "depth_in"]
            .iter()
            .map(|f| self.spec.text(f).map(|v| format!("{v}\"")))
            .collect();
        let value = dims
            .map(|d| d.join(" × "))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        self.push("Dimensions (H×W×D)", value);
        self
    }

    fn condenser(mut self) -> Self {
        self = self
            .always("Cooling Capacity", &["cooling_capacity_btuh"])
            .when_present("Heating Capacity", "heating_capacity_btuh");
        let seer = self
            .lookup(&["seer2"])
            .map(|s| format!("Up to {s}"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        self.push("SEER2 Rating", seer);
        self.always("EER2 Rating", &["eer2"])
            .when_present("HSPF2 Rating", "hspf2")
            .always("Compressor Type", &["compressor_type"])
            .voltage(true)
            .always("Min Circuit Ampacity", &["mca"])
            .always("Max Overcurrent Protection", &["mop"])
            .always("Liquid Line Size", &["liquid_line_od_in"])
            .always("Suction Line Size", &["suction_line_od_in"])
            .always("Refrigerant Charge", &["factory_charge_oz"])
            .dimensions()
            .always("Weight", &["shipping_weight_lb"])
            .always("Sound Level", &["sound_level_dba"])
    }

    fn air_handler(self) -> Self {
        self.always("Motor Type", &["motor_type", "blower_motor_type"])
            .always("Motor HP", &["motor_hp"])
            .always("Airflow", &["airflow_cfm"])
            .when_present("Integrated Electric Heat", "electric_heat_kw")
            .when_present("Nominal Cooling Capacity", "nominal_cooling_capacity_btuh")
            .voltage(true)
            .always("Min Circuit Ampacity", &["mca"])
            .always("Max Overcurrent Device", &["mop"])
            .always(
                "Liquid Line Connection",
                &["liquid_line_connection_od_in", "liquid_line_od_in"],
            )
            .always(
                "Suction Line Connection",
                &["suction_line_connection_od_in", "suction_line_od_in"],
            )
            .always("Metering Device", &["metering_device"])
            .dimensions()
            .always("Weight", &["shipping_weight_lb"])
    }

    fn furnace(self) -> Self {
        let mut builder = self
            .always("AFUE Rating", &["afue"])
            .always("Input Capacity", &["input_btuh"])
            .always("Output Capacity", &["output_btuh"])
            .always("Heating Stages", &["heating_stages"])
            .always("Blower Motor Type", &["blower_motor_type"])
            .when_present("Airflow", "airflow_cfm")
            .always("Fuel Type", &["gas_type"])
            .voltage(false)
            .always("Min Circuit Ampacity", &["mca"])
            .always("Max Overcurrent Protection", &["mop"]);

        let rise = match (
            builder.spec.number("temp_rise_min_f"),
            builder.spec.number("temp_rise_max_f"),
        ) {
            (Some(min), Some(max)) => format!("{}-{}°F", format_number(min), format_number(max)),
            _ => NOT_AVAILABLE.to_string(),
        };
        builder.push("Temperature Rise", rise);

        let vent = builder
            .spec
            .text("vent_diameter_in")
            .map(|v| format!("{v}\""))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        builder.push("Vent Size", vent);

        builder
            .when_present("Ignition Type", "ignition_type")
            .dimensions()
            .always("Weight", &["shipping_weight_lb"])
    }

    fn coil(self) -> Self {
        self.always("Coil Type", &["coil_type"])
            .always("Orientation", &["orientation"])
            .always("Metering Device", &["metering_device"])
            .always(
                "Liquid Line Connection",
                &["liquid_line_connection_od_in", "liquid_line_od_in"],
            )
            .always(
                "Suction Line Connection",
                &["suction_line_connection_od_in", "suction_line_od_in"],
            )
            .dimensions()
            .always("Weight", &["shipping_weight_lb"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Afue;

    fn assembler() -> ContentAssembler {
        ContentAssembler::new(Branding {
            brand: "Goodman".to_string(),
            refrigerant: "R-32".to_string(),
        })
    }

    fn ac_condenser() -> SpecRecord {
        SpecRecord::new("GLXS5BA1810")
            .with("equipment_type", "Air Conditioner Condenser")
            .with("tonnage", 1.5)
            .with("cooling_capacity_btuh", 18000.0)
            .with("seer2", 15.2)
            .with("voltage", 230.0)
            .with("liquid_line_od_in", 0.375)
            .with("suction_line_od_in", 0.75)
    }

    fn air_handler() -> SpecRecord {
        SpecRecord::new("AMST24BU13")
            .with("equipment_type", "Air Handler")
            .with("tonnage", 2.0)
            .with("airflow_cfm", 800.0)
    }

    fn value<'a>(rows: &'a [SpecRow], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    #[test]
    fn test_system_title_uses_first_tonnage() {
        let st = SystemType::CondenserAirHandler {
            condenser: Condenser::Ac,
            wall: false,
        };
        let title = assembler().title(&st, &[ac_condenser(), air_handler()], 15.2);
        assert_eq!(
            title,
            "GOODMAN 1.5 Ton 15.2 SEER2 R-32 Air Conditioning System with Air Handler"
        );
    }

    #[test]
    fn test_title_without_tonnage_omits_size() {
        let st = SystemType::FurnaceCoil {
            afue: Afue::Eighty,
            orientation: Orientation::Upflow,
        };
        let title = assembler().title(&st, &[SpecRecord::new("GR9S800603AN")], 14.3);
        assert_eq!(
            title,
            "GOODMAN 14.3 SEER2 R-32 HVAC System with Gas Furnace and Upflow Coil"
        );
    }

    #[test]
    fn test_dual_fuel_title_and_intro() {
        let st = SystemType::CondenserFurnaceCoil {
            condenser: Condenser::Hp,
            afue: Afue::NinetyTwo,
            orientation: Orientation::Horizontal,
        };
        let specs = [SpecRecord::new("GLZS5BA3610").with("tonnage", 3.0)];
        let a = assembler();
        assert_eq!(
            a.title(&st, &specs, 15.2),
            "GOODMAN 3 Ton 15.2 SEER2 R-32 Dual Fuel Heat Pump System with Gas Furnace and Horizontal Coil"
        );
        let intro = a.intro(&st, &specs, 15.2);
        assert!(intro.contains("92% AFUE"));
        assert!(intro.contains("horizontal evaporator coil"));
        assert!(intro.contains("3-ton 15.2 SEER2"));
    }

    #[test]
    fn test_tonnage_from_first_spec_that_has_one() {
        let furnace = SpecRecord::new("GR9S800603AN").with("equipment_type", "80% AFUE Gas Furnace");
        let coil = SpecRecord::new("CAPTA3626B3").with("tonnage", 3.0);
        let specs = [furnace, coil];
        assert_eq!(system_tonnage(&specs), Some(3.0));

        let st = SystemType::FurnaceCoil {
            afue: Afue::Eighty,
            orientation: Orientation::Upflow,
        };
        assert_eq!(
            assembler().title(&st, &specs, 14.3),
            "GOODMAN 3 Ton 14.3 SEER2 R-32 HVAC System with Gas Furnace and Upflow Coil"
        );
    }

    #[test]
    fn test_record_refrigerant_wins_over_product_line() {
        let st = SystemType::CondenserAirHandler {
            condenser: Condenser::Ac,
            wall: false,
        };
        let specs = [ac_condenser().with("refrigerant_type", "R-410A"), air_handler()];
        let a = assembler();
        let title = a.title(&st, &specs, 15.2);
        assert!(title.contains("SEER2 R-410A Air Conditioning"));
        assert!(!title.contains("R-32"));
        assert!(a.intro(&st, &specs, 15.2).contains("R-410A refrigerant"));
        assert_eq!(value(&a.rows(&specs[0]), "Refrigerant"), Some("R-410A"));
    }

    #[test]
    fn test_text_voltage_keeps_units() {
        let spec = SpecRecord::new("GLXS5BA1810").with("voltage", "208/230");
        let rows = assembler().rows_as(&spec, EquipmentKind::AcCondenser);
        assert_eq!(value(&rows, "Voltage"), Some("208/230V / 1Ph / 60Hz"));

        let spec = SpecRecord::new("GR9S800603AN").with("voltage", "115V");
        let rows = assembler().rows_as(&spec, EquipmentKind::Furnace);
        assert_eq!(value(&rows, "Voltage"), Some("115V"));
    }

    #[test]
    fn test_single_titles() {
        let a = assembler();
        let st = SystemType::Single(Category::AcCondenser);
        assert_eq!(
            a.title(&st, &[ac_condenser()], 15.2),
            "Goodman 1.5 Ton R-32 Air Conditioner Condenser - GLXS5BA1810"
        );
        let st = SystemType::Single(Category::Furnace96Afue);
        assert_eq!(
            a.title(&st, &[SpecRecord::new("GR9S960803BN")], 15.2),
            "Goodman 96% AFUE Gas Furnace - GR9S960803BN"
        );
        let st = SystemType::Single(Category::CoilHorizontal);
        assert_eq!(
            a.title(&st, &[SpecRecord::new("CHPTA3630B3").with("tonnage", 3.0)], 15.2),
            "Goodman 3 Ton R-32 Horizontal Evaporator Coil - CHPTA3630B3"
        );
    }

    #[test]
    fn test_wall_intro_mentions_wall_hung() {
        let st = SystemType::CondenserAirHandler {
            condenser: Condenser::Hp,
            wall: true,
        };
        let intro = assembler().intro(&st, &[air_handler()], 15.2);
        assert!(intro.contains("wall-hung air handler"));
        assert!(intro.contains("2-ton heat pump"));
    }

    #[test]
    fn test_condenser_rows() {
        let rows = assembler().rows(&ac_condenser());
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            &labels[..6],
            &[
                "Manufacturer",
                "Tonnage",
                "Refrigerant",
                "SKU/Model No",
                "Product Type",
                "Cooling Capacity"
            ]
        );
        assert!(!labels.contains(&"Heating Capacity"));
        assert!(!labels.contains(&"HSPF2 Rating"));
        assert_eq!(value(&rows, "Tonnage"), Some("1.5 Ton"));
        assert_eq!(value(&rows, "Refrigerant"), Some("R-32"));
        assert_eq!(value(&rows, "Cooling Capacity"), Some("18,000 BTU/h"));
        assert_eq!(value(&rows, "SEER2 Rating"), Some("Up to 15.2"));
        assert_eq!(value(&rows, "EER2 Rating"), Some("N/A"));
        assert_eq!(value(&rows, "Voltage"), Some("230V / 1Ph / 60Hz"));
        assert_eq!(value(&rows, "Liquid Line Size"), Some("⅜\""));
        assert_eq!(value(&rows, "Suction Line Size"), Some("¾\""));
        assert_eq!(value(&rows, "Dimensions (H×W×D)"), Some("N/A"));
        assert_eq!(labels.last(), Some(&"Sound Level"));
    }

    #[test]
    fn test_air_handler_rows_fall_back_to_line_od() {
        let spec = air_handler()
            .with("blower_motor_type", "Multi-Speed ECM")
            .with("liquid_line_od_in", 0.375)
            .with("electric_heat_kw", 5.0)
            .with("height_in", 45.0)
            .with("width_in", 17.5)
            .with("depth_in", 21.0);
        let rows = assembler().rows_as(&spec, EquipmentKind::AirHandler);
        assert_eq!(value(&rows, "Motor Type"), Some("Multi-Speed ECM"));
        assert_eq!(value(&rows, "Airflow"), Some("800 CFM"));
        assert_eq!(value(&rows, "Integrated Electric Heat"), Some("5 kW"));
        assert_eq!(value(&rows, "Liquid Line Connection"), Some("⅜\""));
        assert_eq!(value(&rows, "Suction Line Connection"), Some("N/A"));
        assert_eq!(value(&rows, "Dimensions (H×W×D)"), Some("45\" × 17.5\" × 21\""));
        assert!(value(&rows, "Nominal Cooling Capacity").is_none());
    }

    #[test]
    fn test_furnace_rows_after_enrichment() {
        let raw = SpecRecord::new("GR9S800603AN")
            .with("equipment_type", "80% AFUE Gas Furnace")
            .with("stages", 1.0)
            .with("input_btuh", 60000.0)
            .with("temp_rise_min_f", 30.0)
            .with("temp_rise_max_f", 60.0)
            .with("vent_diameter_in", 4.0);
        let spec = enrich(&raw, Category::Furnace80Afue);
        let rows = assembler().rows_as(&spec, EquipmentKind::Furnace);
        assert_eq!(value(&rows, "AFUE Rating"), Some("80%"));
        assert_eq!(value(&rows, "Input Capacity"), Some("60,000 BTU/h"));
        assert_eq!(value(&rows, "Heating Stages"), Some("Single Stage"));
        assert_eq!(value(&rows, "Blower Motor Type"), Some("Multi-Speed ECM"));
        assert_eq!(value(&rows, "Temperature Rise"), Some("30-60°F"));
        assert_eq!(value(&rows, "Vent Size"), Some("4\""));
        assert!(value(&rows, "Ignition Type").is_none());
        assert!(value(&rows, "Tonnage").is_none());
    }

    #[test]
    fn test_coil_enrichment_keeps_present_fields() {
        let raw = SpecRecord::new("CAPTA3626B3")
            .with("equipment_type", "Cased Upflow Coil")
            .with("metering_device", "Piston");
        let spec = enrich(&raw, Category::CoilUpflow);
        assert_eq!(spec.text("orientation").as_deref(), Some("Upflow"));
        assert_eq!(spec.text("metering_device").as_deref(), Some("Piston"));
        assert!(!spec.has("liquid_line_od_in"));
        assert!(!spec.has("shipping_weight_lb"));

        let bare = enrich(&SpecRecord::new("CHPTA3630B3"), Category::CoilHorizontal);
        assert_eq!(bare.text("orientation").as_deref(), Some("Horizontal"));
        assert_eq!(bare.text("metering_device").as_deref(), Some("TXV"));
    }

    #[test]
    fn test_furnace_afue_from_equipment_type() {
        let raw = SpecRecord::new("GRVT960803CN").with("equipment_type", "96% Variable Speed Furnace");
        let spec = enrich(&raw, Category::Furnace80Afue);
        assert_eq!(spec.number("afue"), Some(96.0));
        assert_eq!(spec.text("blower_motor_type").as_deref(), Some("Variable Speed ECM"));
    }
}
