#![no_main]
use frankenprintf_core::{FormatError, Template};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    match Template::compile(text) {
        Ok(template) => {
            assert_eq!(template.source(), text);
            assert_eq!(
                template.literal_segments().len(),
                template.placeholder_count() + 1
            );
        }
        Err(FormatError::MalformedTemplate { position, .. }) => {
            assert!(position <= text.len());
        }
        Err(other) => panic!("compile returned a render error: {other}"),
    }
});
