//! Prints what kind of CMS/PKCS container each given file holds.
//!
//! cargo run --example detect_file -- signed.p7s keystore.p12

use std::{env, fs, process};

use cmsdetect::{
    detect, is_pkcs12, is_pkcs7_enveloped_data, is_pkcs7_signed_data, is_regional_key_pkcs12,
};

fn main() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: detect_file <file>...");
        process::exit(2);
    }

    let mut failed = false;
    for path in &paths {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("{}: error reading file: {}", path, e);
                failed = true;
                continue;
            }
        };

        let result = match detect(&data) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{}: error detecting format: {}", path, e);
                failed = true;
                continue;
            }
        };

        println!("{}: detected format: {}", path, result.type_name());
        if let Some(oid) = &result.content_type {
            println!("{}: content type OID: {}", path, oid);
        }

        if is_pkcs7_signed_data(&data) {
            println!("{}: this is a signed PKCS#7 file", path);
        } else if is_pkcs7_enveloped_data(&data) {
            println!("{}: this is an enveloped PKCS#7 file", path);
        } else if is_regional_key_pkcs12(&data) {
            println!("{}: this is an NCA RK (KalkanCrypt) key container", path);
        } else if is_pkcs12(&data) {
            println!("{}: this is a PKCS#12 certificate store", path);
        }
    }

    if failed {
        process::exit(1);
    }
}
