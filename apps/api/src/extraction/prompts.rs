// Prompt template for syllabus extraction.
// The Gemini call requests JSON output, so the schema lives in the prompt
// and the response is parsed into a draft for validation.

pub const SYLLABUS_EXTRACTION_PROMPT: &str = r#"Extract the syllabus information from this document.
Focus on finding:
1. The official class name
2. The course code (e.g., CS 251, MATH 101)
3. All assignments with their due dates, due times, and submission links

OUTPUT SCHEMA (return exactly this structure):
{
  "class_name": "string",
  "course_code": "string",
  "assignments": [
    {
      "name": "string",
      "due_date": "YYYY-MM-DD",
      "due_time": "string",
      "submission_link": "string",
      "status": "NOT_STARTED"
    }
  ]
}

RULES:
1. The assignment name is the full assignment name/title.
2. due_date must be in YYYY-MM-DD format (e.g., 2025-09-06, 2025-10-15). If the
   date is not specified or unclear, use a reasonable default date in proper
   YYYY-MM-DD format. Do not use any other date format.
3. If the due time is not specified, use "11:59 PM" as default.
4. If the submission link is not specified, use "N/A" as default. Look for
   submission links in various formats like URLs, Canvas links, or references
   to submission platforms.
5. Return ONLY the JSON object, nothing else, no code fences."#;
