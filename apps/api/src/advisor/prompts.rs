// Career advisor prompt templates.
// All prompts for the advisor module are defined here.
// Placeholders use `{name}` and are filled with `str::replace`.

/// Marker the counselor emits once it has gathered enough information.
pub const READY_SENTINEL: &str = "READY_FOR_RECOMMENDATION";

/// The closed set of careers the mapper is asked to choose from.
pub const CAREER_CATALOG: &[&str] = &[
    "Software Engineering",
    "Data Science",
    "Graphic Design",
    "Marketing",
    "Nursing",
    "Engineering",
    "Music Production",
    "Sports Management",
];

pub const PREFERENCE_EXTRACTION_PROMPT: &str = r#"You are an expert at extracting career preferences from conversations.

Task: Analyze the conversation below and extract career-related information.

Conversation:
{conversation}

Instructions:
1. Read the conversation carefully
2. Extract only mentioned preferences (do not infer or assume)
3. Rate confidence based on how explicitly preferences were stated
4. Return valid JSON only

Required JSON format:
{
  "interests": ["interest1", "interest2"],
  "skills": ["skill1", "skill2"],
  "dislikes": ["dislike1", "dislike2"],
  "work_style": "description of work preferences",
  "confidence_score": 0.7
}

Return only the JSON object."#;

pub const CAREER_MAPPING_PROMPT: &str = r#"You are a career matching expert.

Available Career Paths:
{career_catalog}

User Preferences:
{preferences}

Task: Select 2-3 best matching careers based on the preferences.

Instructions:
1. Match preferences to career requirements
2. Provide specific reasons for each match
3. Rate overall confidence in recommendations
4. Return valid JSON only

Required JSON format:
{
  "career_paths": ["career1", "career2"],
  "match_reasons": ["specific reason for career1", "specific reason for career2"],
  "confidence_score": 0.8
}

Return only the JSON object."#;

pub const EXPLANATION_PROMPT: &str = r#"Explain why {career_path} matches someone with these interests: {interests}

Requirements:
- Keep explanation under 80 words
- Focus on specific connections between interests and career
- Use encouraging tone
- Be concrete and practical

Explanation:"#;

pub const CLARIFY_INSUFFICIENT_INFO_PROMPT: &str = r#"The user hasn't shared enough about their career interests.

Ask exactly 1 thoughtful question to learn about either:
- Their hobbies and interests
- Their natural skills and strengths
- Their ideal work environment

Be warm and conversational. Don't overwhelm with multiple questions.

Question:"#;

pub const CLARIFY_GENERAL_PROMPT: &str = r#"Based on this context: {context}

Ask exactly 1 specific follow-up question to better understand their career preferences.

Focus on one area that needs clarification. Be supportive and conversational.

Question:"#;

pub const COUNSELOR_SYSTEM: &str = r#"You are a supportive career counselor. Your role is to help people discover suitable career paths through gentle conversation.

Your approach:
- Ask only 1 question at a time to avoid overwhelming
- Be warm, encouraging, and patient
- Listen actively and build on their responses
- Focus on understanding their unique situation

Information to gather:
- What activities energize them
- What they're naturally good at
- Their preferred work environment
- What they want to avoid in work
- Their career aspirations

When you have sufficient information to make confident recommendations, respond with:
"READY_FOR_RECOMMENDATION"

Remember: Quality conversation over quantity of questions."#;

/// Opening human message that seeds a clarification conversation.
pub const CONVERSATION_OPENER: &str = "Based on this initial information: '{initial_text}', \
I need to ask some clarifying questions to better understand your career preferences.";

pub const RESPONSE_VALIDATION_PROMPT: &str = r#"Evaluate if this career counselor response is appropriate:

Response: {response}

Check if the response:
1. Asks only 1 question (not multiple)
2. Is encouraging and supportive
3. Builds on previous conversation
4. Stays focused on career exploration

Return: "VALID" or "NEEDS_REVISION: [reason]""#;

pub const CONVERSATION_SUMMARY_PROMPT: &str = r#"Summarize the key career preferences discovered in this conversation:

Conversation: {conversation}

Create a concise summary focusing on:
- Main interests and passions
- Key skills and strengths
- Work style preferences
- Career goals or aspirations
- Things to avoid

Summary:"#;

/// Renders the catalog as a bulleted list for the mapping prompt.
pub fn career_catalog_list() -> String {
    CAREER_CATALOG
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counselor_system_names_the_sentinel() {
        assert!(COUNSELOR_SYSTEM.contains(READY_SENTINEL));
    }

    #[test]
    fn test_catalog_list_has_one_line_per_career() {
        let list = career_catalog_list();
        assert_eq!(list.lines().count(), CAREER_CATALOG.len());
        assert!(list.starts_with("- Software Engineering"));
    }

    #[test]
    fn test_templates_expose_their_placeholders() {
        assert!(PREFERENCE_EXTRACTION_PROMPT.contains("{conversation}"));
        assert!(CAREER_MAPPING_PROMPT.contains("{preferences}"));
        assert!(CAREER_MAPPING_PROMPT.contains("{career_catalog}"));
        assert!(EXPLANATION_PROMPT.contains("{career_path}"));
        assert!(EXPLANATION_PROMPT.contains("{interests}"));
        assert!(CLARIFY_GENERAL_PROMPT.contains("{context}"));
        assert!(CONVERSATION_OPENER.contains("{initial_text}"));
        assert!(RESPONSE_VALIDATION_PROMPT.contains("{response}"));
        assert!(CONVERSATION_SUMMARY_PROMPT.contains("{conversation}"));
    }
}
