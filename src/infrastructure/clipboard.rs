use arboard::Clipboard;

pub struct ClipboardService;

impl ClipboardService {
    /// Copies text to the system clipboard.
    pub fn copy_text(text: &str) -> Result<String, String> {
        let mut clipboard =
            Clipboard::new().map_err(|e| format!("Failed to access clipboard: {}", e))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| format!("Failed to copy to clipboard: {}", e))?;

        Ok(text.to_string())
    }
}
