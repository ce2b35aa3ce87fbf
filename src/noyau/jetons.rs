// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),
    Pi,

    // Fonctions + variables + constantes nommées (tout sauf pi / opérateur / nombre)
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction, x, e ou un symbole inconnu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    // Moins unaire : jamais produit par tokenize(), seulement par to_rpn().
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12) et décimaux (ex: 0.25, .5) -> Num exact (0.25 = 1/4)
/// - opérateurs + - * / ^ et ** (puissance, comme ^)
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée, comparée en minuscules plus tard)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance (notation Python)
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Tok::Pi);
                i += 1;
                continue;
            }
            '√' => {
                out.push(Tok::Ident("sqrt".to_string()));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            if word.eq_ignore_ascii_case("pi") {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(word));
            }
            continue;
        }

        // Nombre : entier ou décimal, converti en rationnel exact
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let int_str: String = chars[start..i].iter().collect();

            let mut frac_str = String::new();
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                let start_f = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                frac_str = chars[start_f..i].iter().collect();
            }

            if int_str.is_empty() && frac_str.is_empty() {
                return Err("nombre invalide: '.'".into());
            }
            if i < chars.len() && chars[i] == '.' {
                return Err("nombre invalide: deux points décimaux".into());
            }

            out.push(Tok::Num(decimal_exact(&int_str, &frac_str)?));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// "12" + "05" -> 1205/100 (réduit).
fn decimal_exact(int_str: &str, frac_str: &str) -> Result<BigRational, String> {
    let chiffres = format!("{int_str}{frac_str}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or("nombre invalide")?;
    let d = BigInt::from(10).pow(frac_str.len() as u32);
    if d.is_zero() {
        return Err("nombre invalide".into());
    }
    Ok(BigRational::new(n, d))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
