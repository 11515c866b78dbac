// All prompt templates for the Generation module.
//
// Both templates end mid-structure (a half sentence, a list opener) so the model
// continues inside the section the extractor looks for.

use crate::generation::ContentKind;
use crate::llm_client::GenerationParams;

/// Marker that opens the summary section in prompt and output.
pub const SUMMARY_MARKER: &str = "SUMMARY:";
/// Marker that opens the skills section in prompt and output.
pub const SKILLS_MARKER: &str = "SKILLS:";

/// Summary prompt template. Replace `{job_title}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "TASK: Write a professional resume summary.
JOB TITLE: {job_title}
INSTRUCTIONS: The summary should be in first person, be around 50 words, and highlight key qualifications. Write as a single paragraph.
SUMMARY: I am a skilled {job_title} with experience in";

/// Skills prompt template. Replace `{job_title}` before sending.
pub const SKILLS_PROMPT_TEMPLATE: &str = "
TASK: List important skills for a job position.
JOB TITLE: {job_title}
INSTRUCTIONS: List 10 technical and soft skills relevant to this position. Separate each skill with a comma.
SKILLS:
1.";

/// Returns the section marker the extractor anchors on for `kind`.
pub fn marker(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Summary => SUMMARY_MARKER,
        ContentKind::Skills => SKILLS_MARKER,
    }
}

/// Builds the prompt for `kind`, embedding the job title verbatim.
pub fn build_prompt(kind: ContentKind, job_title: &str) -> String {
    let template = match kind {
        ContentKind::Summary => SUMMARY_PROMPT_TEMPLATE,
        ContentKind::Skills => SKILLS_PROMPT_TEMPLATE,
    };
    template.replace("{job_title}", job_title)
}

/// Sampling parameters tuned per content kind.
pub fn generation_params(kind: ContentKind) -> GenerationParams {
    match kind {
        ContentKind::Summary => GenerationParams {
            max_length: 250,
            min_length: 150,
            do_sample: true,
            temperature: 0.7,
            top_p: 0.9,
            num_return_sequences: 1,
            no_repeat_ngram_size: Some(2),
        },
        ContentKind::Skills => GenerationParams {
            max_length: 200,
            min_length: 50,
            do_sample: true,
            temperature: 0.7,
            top_p: 0.9,
            num_return_sequences: 1,
            no_repeat_ngram_size: None,
        },
    }
}
