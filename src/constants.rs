/// Meals drawn per shopping list when MEAL_COUNT is not set
pub const DEFAULT_MEAL_COUNT: usize = 4;

/// Catalog table used when MEAL_TABLE is not set
pub const DEFAULT_MEAL_TABLE: &str = "meals";

/// Port the HTTP API binds when --port is not given
pub const DEFAULT_PORT: u16 = 8080;
