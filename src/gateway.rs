//! Failure-tolerant gateway over the text-generation capability.
//!
//! Every operation resolves to a string: the generated advice on success, a
//! fixed per-operation fallback sentence on any failure. Errors never cross
//! this boundary; the underlying cause is recorded via tracing only. One
//! best-effort call per invocation, no retry and no rate limiting.

use crate::catalog::WindowsVersion;
use crate::gemini::{GenerationRequest, TextModel};
use crate::prompts;

pub const EXPLAIN_FALLBACK: &str =
    "Unable to generate analysis at this time. Please try again.";
pub const TROUBLESHOOT_FALLBACK: &str =
    "I couldn't analyze the problem. Please describe it differently or try again.";
pub const STORAGE_FALLBACK: &str =
    "I couldn't generate a storage audit. Please check your connection.";
pub const OPTIMIZE_FALLBACK: &str =
    "I couldn't fetch advice at the moment. Please try again later.";

pub struct AdviceGateway {
    model: Box<dyn TextModel + Send + Sync>,
}

impl AdviceGateway {
    pub fn new(model: Box<dyn TextModel + Send + Sync>) -> Self {
        Self { model }
    }

    /// Trade-off analysis for one catalog item.
    pub fn explain_bloatware(
        &self,
        title: &str,
        description: &str,
        version: WindowsVersion,
    ) -> String {
        self.call(
            "explain_bloatware",
            GenerationRequest {
                system_instruction: prompts::EXPLAIN_SYSTEM_PROMPT,
                contents: prompts::explain_prompt(title, description, version),
                temperature: prompts::EXPLAIN_TEMPERATURE,
            },
            EXPLAIN_FALLBACK,
        )
    }

    /// Free-form optimization plan from a user query.
    pub fn optimization_advice(&self, query: &str, version: WindowsVersion) -> String {
        self.call(
            "optimization_advice",
            GenerationRequest {
                system_instruction: prompts::OPTIMIZE_SYSTEM_PROMPT,
                contents: prompts::optimize_prompt(query, version),
                temperature: prompts::OPTIMIZE_TEMPERATURE,
            },
            OPTIMIZE_FALLBACK,
        )
    }

    /// Storage-reclamation audit, optionally seeded with user context.
    pub fn storage_audit(&self, version: WindowsVersion, user_details: Option<&str>) -> String {
        self.call(
            "storage_audit",
            GenerationRequest {
                system_instruction: prompts::STORAGE_SYSTEM_PROMPT,
                contents: prompts::storage_prompt(version, user_details),
                temperature: prompts::STORAGE_TEMPERATURE,
            },
            STORAGE_FALLBACK,
        )
    }

    /// Troubleshoot a described problem.
    pub fn troubleshoot(&self, problem: &str, version: WindowsVersion) -> String {
        self.call(
            "troubleshoot",
            GenerationRequest {
                system_instruction: prompts::TROUBLESHOOT_SYSTEM_PROMPT,
                contents: prompts::troubleshoot_prompt(problem, version),
                temperature: prompts::TROUBLESHOOT_TEMPERATURE,
            },
            TROUBLESHOOT_FALLBACK,
        )
    }

    fn call(&self, operation: &str, request: GenerationRequest, fallback: &str) -> String {
        match self.model.generate(&request) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(operation, error = %format!("{err:#}"), "advice request failed");
                fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    type SeenRequests = Arc<Mutex<Vec<(String, String)>>>;

    struct ScriptedModel {
        response: Result<&'static str, &'static str>,
        seen: SeenRequests,
    }

    impl ScriptedModel {
        fn ok(text: &'static str) -> Self {
            Self {
                response: Ok(text),
                seen: Arc::default(),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                response: Err(message),
                seen: Arc::default(),
            }
        }

        fn seen(&self) -> SeenRequests {
            Arc::clone(&self.seen)
        }
    }

    impl TextModel for ScriptedModel {
        fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push((
                request.system_instruction.to_string(),
                request.contents.clone(),
            ));
            match self.response {
                Ok(text) => Ok(text.to_string()),
                Err(message) => Err(anyhow!(message)),
            }
        }
    }

    #[test]
    fn success_passes_model_text_through() {
        let gateway = AdviceGateway::new(Box::new(ScriptedModel::ok("Remove it.")));
        assert_eq!(
            gateway.explain_bloatware("Cortana", "legacy", WindowsVersion::Win10),
            "Remove it."
        );
    }

    #[test]
    fn each_operation_falls_back_on_failure() {
        let gateway = AdviceGateway::new(Box::new(ScriptedModel::failing("boom")));
        assert_eq!(
            gateway.explain_bloatware("Cortana", "legacy", WindowsVersion::Win10),
            EXPLAIN_FALLBACK
        );
        assert_eq!(
            gateway.optimization_advice("slow pc", WindowsVersion::Win11),
            OPTIMIZE_FALLBACK
        );
        assert_eq!(
            gateway.storage_audit(WindowsVersion::Win11, None),
            STORAGE_FALLBACK
        );
        assert_eq!(
            gateway.troubleshoot("taskbar frozen", WindowsVersion::Win10),
            TROUBLESHOOT_FALLBACK
        );
    }

    #[test]
    fn operations_route_their_own_directives() {
        let model = ScriptedModel::ok("ok");
        let seen = model.seen();
        let gateway = AdviceGateway::new(Box::new(model));
        gateway.troubleshoot("clicking HDD", WindowsVersion::Win10);
        gateway.storage_audit(WindowsVersion::Win11, Some("64GB SSD"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        // The troubleshooting directive carries the hardware death warnings.
        assert_eq!(seen[0].0, prompts::TROUBLESHOOT_SYSTEM_PROMPT);
        assert_eq!(
            seen[0].1,
            "Troubleshoot this Windows win10 problem: clicking HDD"
        );
        assert_eq!(seen[1].0, prompts::STORAGE_SYSTEM_PROMPT);
        assert!(seen[1].1.ends_with("User Context: 64GB SSD"));
    }

    #[test]
    fn empty_query_still_resolves_to_string() {
        // Precondition checks live at call sites; the gateway itself is
        // total even for empty input.
        let gateway = AdviceGateway::new(Box::new(ScriptedModel::ok("answer")));
        assert_eq!(gateway.optimization_advice("", WindowsVersion::Win10), "answer");
    }
}
