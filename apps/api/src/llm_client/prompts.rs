// Prompt templates for the resume/job compatibility analysis.

/// Analysis prompt template. Replace `{job_text}` and `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"
Compare the following job description and resume. Analyze how well the resume matches the job requirements.

Your analysis MUST include:
1. A clear compatibility score from 0 to 100 (format it as 'Compatibility Score: XX/100' or 'Score: XX%').
2. A detailed explanation of why you assigned this score.
3. A list of matching skills found in the resume that align with the job description.
4. A list of missing or partial skills that would improve the candidate's fit for the position.

Job Description:
{job_text}

Resume:
{resume_text}
"#;

/// Builds the analysis prompt for one job description / resume pair.
pub fn build_analysis_prompt(job_text: &str, resume_text: &str) -> String {
    // Resume first: a job description containing the literal `{resume_text}`
    // must not have the resume spliced into it.
    ANALYSIS_PROMPT_TEMPLATE
        .replacen("{resume_text}", resume_text, 1)
        .replacen("{job_text}", job_text, 1)
}
