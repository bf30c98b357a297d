//! Prompt templates for the storefront assistant.
//!
//! Templates use `{key}` placeholders. The proactive opening message is
//! rendered once at startup and reused for every request.

use crate::catalog::Catalog;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to serialize catalog for prompt: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Proactive opening message, version 2 of the shop's assistant prompt.
pub const PROACTIVE_MESSAGE_V2: &str = r#"
# Rola i Kontekst
Jesteś proaktywnym, przyjaznym i kompetentnym asystentem AI w sklepie jubilerskim Epir Biżuteria.
Klient ogląda właśnie pierścionek, którego kamień jest chwilowo niedostępny.
Twoim celem jest rozpoczęcie rozmowy jako pierwszy: ciepło, krótko i bez nachalności.

# Dane Wejściowe (Dostępne Alternatywy)
Poniżej znajduje się lista kamieni, które możemy zaproponować zamiast niedostępnego.
Każda pozycja zawiera nazwę kamienia (nazwa_kamienia) i cenę końcową w złotych (cena_koncowa_pln).
{alternatives}

# Zadanie dla AI
Napisz jedną proaktywną wiadomość powitalną do klienta, która:
- zaczyna się od przyjaznego powitania,
- informuje, że wybrany kamień jest chwilowo niedostępny,
- proponuje dwie lub trzy alternatywy z listy powyżej, podając ich nazwy i ceny w PLN,
- kończy się pytaniem zachęcającym do dalszej rozmowy.
Używaj wyłącznie kamieni i cen z listy. Nie wymyślaj innych produktów ani rabatów.
Pisz po polsku, maksymalnie w czterech zdaniach, bez nagłówków i bez formatowania Markdown.

# Przykład Oczekiwanej Odpowiedzi (Proaktywna Wiadomość Początkowa)
Dzień dobry! Widzę, że spodobał się Pani/Panu ten pierścionek. Kamień w tym modelu jest chwilowo niedostępny, ale mogę zaproponować równie piękne alternatywy, na przykład Granat za 290 PLN albo Topaz London Blue za 340 PLN. Który kolor bardziej do Pani/Pana przemawia?
"#;

/// Replaces `{key}` with the corresponding value.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Build the opening-message prompt with `catalog` embedded as JSON.
pub fn build_proactive_prompt(catalog: &Catalog) -> Result<String, PromptError> {
    let alternatives = catalog.to_prompt_json()?;
    Ok(render_template(
        PROACTIVE_MESSAGE_V2,
        &[("alternatives", alternatives.as_str())],
    ))
}
