use crate::entities::BlogRequest;
use crate::error::Result;
use minijinja::{context, Environment};

pub const PROMPT_TEMPLATE: &str = r#"
    Create an insightful and engaging blog post on the topic "{{ input_text }}" for the {{ blog_style }} audience. Share your expertise and opinions while providing valuable information. Craft a narrative that captivates the readers and keeps them interested throughout the article. Aim to cover the key aspects within a limit of {{ no_words }} words. Remember to include examples, real-world scenarios, and any recent developments related to the topic. Your goal is to deliver a well-rounded and informative piece that resonates with the {{ blog_style }} community.
    "#;

/// Fills the prompt template. Values are inserted verbatim.
pub fn build_prompt(request: &BlogRequest) -> Result<String> {
    let prompt = Environment::new().render_str(PROMPT_TEMPLATE, context! {
        input_text => &request.topic,
        blog_style => request.audience.label(),
        no_words => request.word_count,
    })?;
    Ok(prompt.trim().to_string())
}
