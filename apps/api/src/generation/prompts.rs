// All LLM prompt constants for the Generation module.
// The answer-synthesis wrapper lives in llm_client::prompts.

/// Interview question instructions. Replace every `{candidate_name}` before sending.
///
/// Section headers are deliberately un-numbered: the model copies numbering it
/// sees, and the output must stay un-numbered.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are a technical interview expert. Your task is to generate interview questions for the candidate, {candidate_name}, based on the provided Job Description and Resume.

From the Job Description:
- Generate 3 questions that assess {candidate_name}'s fundamental understanding of the key concepts (easy level).
- Generate 3 questions that require deeper knowledge and experience related to the core responsibilities and technologies mentioned in the Job Description (medium level).
- Ensure that each question includes context from the Job Description, explaining why it is relevant to the role and how it relates to what the candidate will be expected to do on a day-to-day basis.
- Prioritize roles, responsibilities, and the key expectations from the candidate as outlined in the Job Description.

From the Resume:
- Generate 1 question that assesses {candidate_name}'s fundamental understanding based on their listed skills and experiences (easy level).
- Generate 2 questions that require deeper knowledge and experience, focusing on the candidate's previous work experience, specific technologies they have worked with, projects they have completed, and the skills they have developed (medium level).
- Ensure that each question references specific skills, experiences, or accomplishments from {candidate_name}'s resume, explaining why it is being asked.

General Guidelines:
- The questions should flow naturally as part of an ongoing conversation between the interviewer and {candidate_name}.
- Ensure that the questions are well-structured, relevant, and personalized, focusing on the specific technologies, methodologies, and experiences mentioned in both the Job Description and Resume.
- The tone and language should be appropriate for a real interview setting, making the interaction feel genuine and engaging.
- Do not mention question numbering. List the questions without numbering and ensure the format is consistent.

Level of Difficulty:
- Consider the candidate's years of experience when generating questions. Tailor the difficulty (easy, medium, hard) based on their experience level.
- Easy questions should generally come from the skills section, while medium and hard questions should delve into the candidate's experience and deeper understanding of the technologies and responsibilities outlined.

Specific Considerations:
- Ensure more context is provided in the questions derived from the Job Description compared to those from the Resume.
- Consider the section "roles and responsibilities/what company is expecting from candidate" in the Job Description when generating questions.
- Assume you are conducting a real interview and thoroughly review both the Job Description and Resume to generate relevant and comprehensive interview questions."#;

pub const CANDIDATE_NAME_PLACEHOLDER: &str = "{candidate_name}";

/// Fills the interview question template for one candidate.
pub fn build_question_prompt(candidate_name: &str) -> String {
    INTERVIEW_QUESTIONS_PROMPT_TEMPLATE.replace(CANDIDATE_NAME_PLACEHOLDER, candidate_name)
}
