use std::collections::HashMap;

const SERVICE_NAME: &str = "meeting-insight";
const KEYRING_SERVER: &str = "gemini-api";

fn attributes() -> HashMap<&'static str, &'static str> {
    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", KEYRING_SERVER);
    attrs
}

/// Store the Gemini API key in the system keyring, replacing any previous one.
pub async fn store_api_key(key: &str) -> Result<(), String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    keyring
        .create_item("Meeting Insight Gemini API Key", &attributes(), key.as_bytes(), true)
        .await
        .map_err(|e| format!("Failed to store API key: {}", e))?;

    Ok(())
}

/// Load the Gemini API key from the system keyring.
pub async fn load_api_key() -> Result<Option<String>, String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    let items = keyring
        .search_items(&attributes())
        .await
        .map_err(|e| format!("Failed to search keyring: {}", e))?;

    if let Some(item) = items.first() {
        let secret_bytes = item
            .secret()
            .await
            .map_err(|e| format!("Failed to read secret: {}", e))?;
        let key = String::from_utf8(secret_bytes.to_vec())
            .map_err(|e| format!("Invalid UTF-8 in secret: {}", e))?;
        if !key.is_empty() {
            return Ok(Some(key));
        }
    }

    Ok(None)
}

/// Remove every stored Gemini API key.
pub async fn delete_api_key() -> Result<(), String> {
    let keyring = oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))?;

    let items = keyring
        .search_items(&attributes())
        .await
        .map_err(|e| format!("Failed to search keyring: {}", e))?;

    for item in items {
        item.delete()
            .await
            .map_err(|e| format!("Failed to delete API key: {}", e))?;
    }

    Ok(())
}
