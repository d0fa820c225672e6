use chrono::NaiveDate;

use super::config::ScreeningConfig;
use super::domain::ApplicationRecord;

const NOT_PROVIDED: &str = "Not provided";
const ELLIPSIS: &str = "...";

/// Sentinel age when the birth date is absent; the rubric tells the model to
/// weigh the other signals instead.
const AGE_UNKNOWN: i32 = -1;

/// Renders the evaluation instruction block for a single application. The
/// rubric wording is a fixed template; the reasoning language and per-field
/// truncation limit come from configuration. Every free-text field is capped
/// independently so oversized answers cannot inflate the downstream call.
pub(crate) fn build_prompt(
    record: &ApplicationRecord,
    config: &ScreeningConfig,
    today: NaiveDate,
) -> String {
    let age = record.age_on(today).unwrap_or(AGE_UNKNOWN);
    let limit = config.answer_truncate_length;
    let field = |value: &Option<String>| answer_field(value.as_deref(), limit);

    format!(
        r#"Evaluate this Minecraft server application. Respond ONLY with JSON format: {{"recommendation": "ACCEPT|DECLINE", "reasoning": "brief explanation", "confidence": 0.0-1.0}}

CRITERIA:
- Age {age} ({minimum_age}+ required, older preferred for adult community)
- Launcher: {launcher} (denylisted launchers auto-decline)
- Version: {version}
- Answers must be detailed, well-punctuated, genuine, show interest
- Poor punctuation = most probably auto-decline (no capitals, commas, periods)
- Age should correlate with answer maturity

APPLICATION ANSWERS:
Server Source: "{server_source}"
Quiz Answer: "{quiz_answer}"

SURVIVAL SECTION (Wiped server for casual play):
Russian Word Reaction: "{russian_word_reaction}"
Admin Decision Attitude: "{admin_decision_attitude}"
Conflict Reaction: "{conflict_reaction}"
New Rule Reaction: "{new_rule_reaction}"
Negative Server Experience: "{server_experience_negative}"
Useful Skills: "{useful_skills}"
Useful Skills Detailed: "{useful_skills_detailed}"

EVERVAULT SECTION (Permanent server for long-term projects):
Community Projects Readiness: "{community_projects_readiness}"
Healthy Community Definition: "{healthy_community_definition}"
Ideal Server Description: "{ideal_server_description}"
Long Project Experience: "{long_project_experience}"
Private Server Experience: "{private_server_experience}"

Application has two sections: Survival and Evervault. Each section has its own questions, so when evaluating, consider that if some answers are not provided, it may be due to the applicant not filling out that section. This is normal and should not be considered a negative factor.
Main section applicable to both: age, launcher, server source, version.
Survival section: russian word reaction, admin decision attitude, conflict reaction, new rule attitude, negative server experience, useful skills.
Evervault section: community projects readiness, healthy community definition, ideal server description, long project experience, private server experience.

Evervault is the server without wipes, where players can build and create long-term projects. Survival is the server with wipes, where players can play in a more casual way. Some answers may signal that the applicant is more suitable for one server type than the other, but this is not a strict requirement. You can recommend them for both servers if they meet the criteria, or for one if they are more suitable for it.

Focus on answer quality, punctuation, maturity level matching stated age, and genuine interest. Make sure the answers are made by human, not generated via LLM. The reasoning in the response must be in {language} language."#,
        age = age,
        minimum_age = config.minimum_age,
        launcher = answer_field(record.launcher.as_deref(), limit),
        version = field(&record.version),
        server_source = field(&record.server_source),
        quiz_answer = field(&record.quiz_answer),
        russian_word_reaction = field(&record.russian_word_reaction),
        admin_decision_attitude = field(&record.admin_decision_attitude),
        conflict_reaction = field(&record.conflict_reaction),
        new_rule_reaction = field(&record.new_rule_reaction),
        server_experience_negative = field(&record.server_experience_negative),
        useful_skills = field(&record.useful_skills),
        useful_skills_detailed = field(&record.useful_skills_detailed),
        community_projects_readiness = field(&record.community_projects_readiness),
        healthy_community_definition = field(&record.healthy_community_definition),
        ideal_server_description = field(&record.ideal_server_description),
        long_project_experience = field(&record.long_project_experience),
        private_server_experience = field(&record.private_server_experience),
        language = config.reasoning_language,
    )
}

/// Truncates a single answer to the configured limit (counted in characters so
/// Cyrillic answers are never split mid-codepoint) and substitutes a fixed
/// placeholder for absent or blank values.
pub(crate) fn answer_field(value: Option<&str>, limit: usize) -> String {
    match value {
        None => NOT_PROVIDED.to_string(),
        Some(text) if text.trim().is_empty() => NOT_PROVIDED.to_string(),
        Some(text) => {
            if text.chars().count() > limit {
                let mut truncated: String = text.chars().take(limit).collect();
                truncated.push_str(ELLIPSIS);
                truncated
            } else {
                text.to_string()
            }
        }
    }
}
