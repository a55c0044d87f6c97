// file: src/stages/prompts.rs
// description: prompt templates with named placeholder substitution
// reference: Internal prompt wording

pub const SUMMARIZE: PromptTemplate =
    PromptTemplate::new("Summarize the following email content:\n{body}");

pub const TRANSLATE: PromptTemplate =
    PromptTemplate::new("Translate this email summary to only {target_language}:\n{summary}");

pub const GUESS_PRODUCT: PromptTemplate =
    PromptTemplate::new("Give only the product by analysing this review: {review_body}");

pub const ANALYSE_SENTIMENT: PromptTemplate = PromptTemplate::new(
    "Try to analyse the sentiment of the {review} like 'Positive','Negative','Neutral' give only result among these 3",
);

pub const COMPOSE_REPLY: PromptTemplate = PromptTemplate::new(
    "Give 1 line sentence for this review: \"{review}\" based on the sentiment:{sentiment} like \"Thank you for feedback\" and give reply for that add the thank for your feedback.",
);

#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Substitutes `{key}` placeholders in one pass, so braces inside the
    /// substituted values are never expanded. Unknown placeholders are kept.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut result = String::with_capacity(
            self.template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            result.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let Some(end) = after.find('}') else {
                rest = &rest[start..];
                break;
            };

            let key = &after[..end];
            match values.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => {
                    result.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    result.push('{');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }
}
