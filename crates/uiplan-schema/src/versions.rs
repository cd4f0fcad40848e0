pub const SCHEMA_PLAN_0_1_0: &str = "uiplan-plan/0.1.0";
