/*
 * Copyright (c) Adrian Alic <contact@alic.dev>
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Offline search tool: finds a collision-free keyword hash and prints
//! the formula and lookup table as Rust constants, ready for embedding
//! in the consuming tokenizer.

use std::process::ExitCode;

use clap::Parser;

use kwhash::keywords::KEYWORDS;
use kwhash::search::{
    DEFAULT_ADDEND, DEFAULT_MAX_MODULUS, DEFAULT_MULTIPLIER,
    DEFAULT_POOL_BITS,
};
use kwhash::{build_matcher, Formula, Matcher, Registry, SearchParams};

#[derive(Parser)]
#[command(
    name = "perfhash",
    about = "Search for a collision-free keyword hash"
)]
struct Args {
    /// Keywords to hash; defaults to the builtin set.
    keywords: Vec<String>,
    /// Number of candidate bit positions for the bit-selection search.
    #[arg(long, default_value_t = DEFAULT_POOL_BITS)]
    pool_bits: usize,
    /// Multiplier of the fallback rolling hash.
    #[arg(long, default_value_t = DEFAULT_MULTIPLIER)]
    multiplier: u64,
    /// Additive constant of the fallback rolling hash.
    #[arg(long, default_value_t = DEFAULT_ADDEND)]
    addend: u64,
    /// Largest modulus tried by the fallback search.
    #[arg(long, default_value_t = DEFAULT_MAX_MODULUS)]
    max_modulus: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let words: Vec<String> = if args.keywords.is_empty() {
        KEYWORDS.iter().map(|(w, _)| (*w).to_owned()).collect()
    } else {
        args.keywords
    };
    let registry = match Registry::from_words(words) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let params = SearchParams {
        pool_bits: args.pool_bits,
        multiplier: args.multiplier,
        addend: args.addend,
        max_modulus: args.max_modulus,
    };
    let matcher = match build_matcher(registry, &params) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    report(&matcher);
    emit(&matcher);
    ExitCode::SUCCESS
}

fn report(matcher: &Matcher<usize>) {
    match matcher.formula() {
        Formula::Bits(f) => {
            println!("collision-free bit selection:");
            for (p, addr) in f.bits.iter().enumerate() {
                println!("    hash bit {p} <- {addr}");
            }
        }
        Formula::Modular(f) => {
            println!(
                "collision-free rolling hash: \
                 h = h*{} + byte + {} (mod {})",
                f.multiplier, f.addend, f.modulus
            );
        }
    }
    println!();
    let formula = matcher.formula();
    for word in matcher.registry().words() {
        println!("{:<10} => {}", word, formula.eval(word.as_bytes()));
    }
}

fn emit(matcher: &Matcher<usize>) {
    println!();
    match matcher.formula() {
        Formula::Bits(f) => {
            let addrs: Vec<String> =
                f.bits.iter().map(|a| a.0.to_string()).collect();
            println!(
                "pub const KEYWORD_HASH_BITS: [u8; {}] = [{}];",
                f.bits.len(),
                addrs.join(", ")
            );
        }
        Formula::Modular(f) => {
            println!(
                "pub const KEYWORD_HASH_MULTIPLIER: u64 = {};",
                f.multiplier
            );
            println!("pub const KEYWORD_HASH_ADDEND: u64 = {};", f.addend);
            println!(
                "pub const KEYWORD_HASH_MODULUS: usize = {};",
                f.modulus
            );
        }
    }
    println!();
    let registry = matcher.registry();
    println!("pub const KEYWORDS: [&str; {}] = [", registry.len());
    for word in registry.words() {
        println!("    {word:?},");
    }
    println!("];");
    println!();
    let table = matcher.table();
    println!("pub const KEYWORD_TABLE: [u8; {}] = [", table.len());
    for row in table.slots().chunks(8) {
        let cells: Vec<String> =
            row.iter().map(|s| format!("0x{s:02x}")).collect();
        println!("    {},", cells.join(", "));
    }
    println!("];");
}
