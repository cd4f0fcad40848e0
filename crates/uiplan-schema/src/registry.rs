use crate::embedded::EmbeddedSchema;
use crate::versions::SCHEMA_PLAN_0_1_0;

const PLAN_SCHEMA: &str = include_str!("../../../schemas/0.1.0/plan.schema.json");

pub fn get_json_schema(schema_id: &str) -> Option<EmbeddedSchema> {
    match schema_id {
        SCHEMA_PLAN_0_1_0 => Some(EmbeddedSchema {
            id: SCHEMA_PLAN_0_1_0,
            json: PLAN_SCHEMA,
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
