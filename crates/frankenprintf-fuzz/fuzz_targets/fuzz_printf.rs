#![no_main]
use frankenprintf_core::{Arg, Template};
use libfuzzer_sys::fuzz_target;

/// Skip cases whose pre-sized buffer alone would dominate the run.
const MAX_ESTIMATE: usize = 1 << 20;

fn arg_from(tag: u8, bytes: [u8; 8], text: &str) -> Arg<'_> {
    let word = u64::from_le_bytes(bytes);
    match tag % 8 {
        0 => Arg::from(word as i64),
        1 => Arg::from(word as i32),
        2 => Arg::from(word),
        3 => Arg::from(f64::from_bits(word)),
        4 => Arg::from(f32::from_bits(word as u32)),
        5 => Arg::from(char::from_u32(word as u32 % 0x11_0000).unwrap_or('?')),
        6 => Arg::from(text),
        _ => Arg::Pointer(word as usize),
    }
}

// Layout: template length byte, template text, then 9-byte argument records
// (tag + 8 payload bytes). Text arguments reuse the template text.
fuzz_target!(|data: &[u8]| {
    let Some((&len, rest)) = data.split_first() else {
        return;
    };
    let len = usize::from(len).min(rest.len());
    let (text, records) = rest.split_at(len);
    let Ok(text) = std::str::from_utf8(text) else {
        return;
    };
    let Ok(template) = Template::compile(text) else {
        return;
    };

    let args: Vec<Arg<'_>> = records
        .chunks_exact(9)
        .take(template.placeholder_count())
        .map(|r| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&r[1..]);
            arg_from(r[0], word, text)
        })
        .collect();
    if args.len() != template.placeholder_count() {
        assert!(template.render(&args).is_err());
        return;
    }

    let Ok(estimate) = template.estimated_len(&args) else {
        panic!("arity already matched");
    };
    if estimate > MAX_ESTIMATE {
        return;
    }
    let Ok(bytes) = template.render_bytes(&args) else {
        panic!("render failed after a successful estimate");
    };
    assert!(bytes.len() <= estimate, "{} > {estimate} for {text:?}", bytes.len());
    assert!(std::str::from_utf8(&bytes).is_ok());
});
