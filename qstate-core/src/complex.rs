//! # Codec textual de amplitudes
//!
//! Forma canônica `(re+imj)`, por exemplo `(1+0j)` ou `(0.5-0.25j)`.
//!
//! Cada componente é escrito com o `Display` de `f64`, que produz a menor
//! representação decimal que volta ao mesmo bit pattern. Por isso
//! `parse_complex(&format_complex(z)) == z` bit a bit, inclusive para `-0.0`.
//!
//! O parser também aceita os literais que um usuário digita em um prompt:
//! `1`, `-0.5`, `2j`, `-j`, `1e-05+2j`, com ou sem parênteses, `j` ou `J`.

use num_complex::Complex64;

use crate::error::{QuantumError, QuantumResult};

/// Serializa um número complexo na forma canônica `(re±imj)`
pub fn format_complex(z: Complex64) -> String {
    let sign = if z.im.is_sign_negative() { '-' } else { '+' };
    format!(
        "({}{}{}j)",
        format_component(z.re),
        sign,
        format_component(z.im.abs())
    )
}

fn format_component(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x == f64::INFINITY {
        "inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{}", x)
    }
}

/// Converte um literal textual em número complexo
pub fn parse_complex(text: &str) -> QuantumResult<Complex64> {
    let invalid = || QuantumError::InvalidAmplitude {
        text: text.to_string(),
    };

    let mut body = text.trim();
    if let Some(inner) = body.strip_prefix('(') {
        body = inner.strip_suffix(')').ok_or_else(invalid)?.trim();
    }
    if body.is_empty() {
        return Err(invalid());
    }

    let Some(imag) = body.strip_suffix(|c: char| c == 'j' || c == 'J') else {
        let re = parse_component(body).ok_or_else(invalid)?;
        return Ok(Complex64::new(re, 0.0));
    };

    match split_index(imag) {
        Some(idx) => {
            let (re, im) = imag.split_at(idx);
            let re = parse_component(re).ok_or_else(invalid)?;
            let im = parse_imaginary(im).ok_or_else(invalid)?;
            Ok(Complex64::new(re, im))
        }
        None => {
            let im = parse_imaginary(imag).ok_or_else(invalid)?;
            Ok(Complex64::new(0.0, im))
        }
    }
}

/// Posição do sinal que separa parte real e imaginária.
/// Sinais de expoente (`1e-05`) e o sinal inicial não contam.
fn split_index(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))
}

/// Coeficiente imaginário; `j`, `+j` e `-j` valem ±1
fn parse_imaginary(s: &str) -> Option<f64> {
    match s {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => parse_component(s),
    }
}

fn parse_component(s: &str) -> Option<f64> {
    if s.chars().any(char::is_whitespace) {
        return None;
    }
    s.parse::<f64>().ok()
}
