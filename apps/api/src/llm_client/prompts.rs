// Shared prompt constants used across advisor services.
// Each service that needs oracle calls keeps its own templates in advisor/prompts.rs.
// This file contains cross-cutting system prompts.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text answers shown directly to the student.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a warm, practical career guidance assistant \
    speaking directly to a student. Answer in plain text without markdown headings.";
