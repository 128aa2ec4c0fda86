// Resume screening: upload intake, the analysis pipeline, and the response
// interpreter that turns a free-text model reply into a structured report.
// All completion calls go through llm_client.

pub mod category;
pub mod handlers;
pub mod interpreter;
pub mod pipeline;
pub mod score;
pub mod skills;
