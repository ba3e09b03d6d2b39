use serde::Serialize;

/// Variable shown when the dashboard first opens.
pub const DEFAULT_VARIABLE: &str = "SOILWATER_10CM";

/// A climate variable the viewer knows how to label.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Variable {
    /// Model output name, the prefix of the member columns (e.g. "PRECT")
    pub code: &'static str,
    /// Human-readable name for menus
    pub name: &'static str,
    /// Display unit, after unit normalization
    pub unit: &'static str,
}

pub const VARIABLES: [Variable; 4] = [
    Variable {
        code: "TREFHTMN",
        name: "Minimum Temperature",
        unit: "°F",
    },
    Variable {
        code: "TREFHTMX",
        name: "Maximum Temperature",
        unit: "°F",
    },
    Variable {
        code: "PRECT",
        name: "Total Precipitation",
        unit: "inch/month",
    },
    Variable {
        code: "SOILWATER_10CM",
        name: "Soil Moisture (Top 10 cm)",
        unit: "kg/m2",
    },
];

impl Variable {
    pub fn from_code(code: &str) -> Option<&'static Variable> {
        VARIABLES.iter().find(|v| v.code == code)
    }

    /// Look up a variable by the name shown in the menu.
    pub fn from_name(name: &str) -> Option<&'static Variable> {
        VARIABLES.iter().find(|v| v.name == name.trim())
    }

    pub fn axis_label(&self) -> String {
        format!("{} [{}]", self.name, self.unit)
    }
}
