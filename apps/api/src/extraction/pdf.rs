use crate::extraction::{normalize_text, ExtractError, TextExtractor};

/// PDF extractor backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn id(&self) -> &str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if bytes.is_empty() {
            return Err(ExtractError::Empty);
        }
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Malformed(e.to_string()))?;
        Ok(normalize_text(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a one-page PDF showing `text` in Helvetica, with a correct xref table.
    fn single_page_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, obj).as_bytes());
        }

        let xref_start = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_start
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let err = PdfTextExtractor.extract(&[]).unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[test]
    fn test_plain_text_renamed_to_pdf_is_malformed() {
        let err = PdfTextExtractor
            .extract(b"John Smith works at Acme Corp.")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
        assert!(err.to_string().starts_with("Failed to extract text"));
    }

    #[test]
    fn test_extracts_text_from_pdf() {
        let pdf = single_page_pdf("Acme Corp");
        let text = PdfTextExtractor.extract(&pdf).unwrap();
        assert!(text.contains("Acme"), "extracted: {text:?}");
    }
}
