pub const PARSE_SYSTEM_PROMPT: &str = "You are an assistant that parses user search queries for a local place search. Always respond with valid JSON.";

pub const RELAX_SYSTEM_PROMPT: &str = "You are an assistant that rewrites local place search queries. Respond with the new query string only.";

pub fn build_parse_prompt(query: &str) -> String {
    format!(
        r#"Given the query, determine the domain (generic or healthcare) and any key terms.
Respond with a JSON object of the form {{"domain": "...", "keywords": ["..."]}}.

User query: {query}"#
    )
}

pub fn build_relax_prompt(original_query: &str) -> String {
    format!(
        r#"The current search returned no results. Suggest a relaxed query that broadens the search,
for example by dropping constraints or using a more general place type.
Respond with the new query string only.

Original query: {original_query}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_query() {
        assert!(build_parse_prompt("find a doctor").ends_with("User query: find a doctor"));
        assert!(build_relax_prompt("vegan bakery").contains("Original query: vegan bakery"));
        assert!(build_parse_prompt("x").contains(r#"{"domain": "...""#));
    }
}
