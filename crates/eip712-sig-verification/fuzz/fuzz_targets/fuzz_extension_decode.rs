//! Fuzz target for the Web3 extension option decoder.
//!
//! ## Running
//!
//! ```bash
//! cd crates/eip712-sig-verification
//! cargo +nightly fuzz run fuzz_extension_decode
//! ```

#![no_main]

use eip712_sig_verification::{DecodedExtension, ExtensionRegistry};
use libfuzzer_sys::fuzz_target;
use shared_types::{Any, WEB3_TX_TYPE_URL};

fuzz_target!(|data: &[u8]| {
    let any = Any {
        type_url: WEB3_TX_TYPE_URL.to_string(),
        value: data.to_vec(),
    };

    // Whatever decodes must re-encode and decode to the same record
    if let Ok(DecodedExtension::Web3Tx(opt)) = ExtensionRegistry::new().decode(&any) {
        let again = ExtensionRegistry::new().decode(&opt.to_any());
        assert_eq!(again, Ok(DecodedExtension::Web3Tx(opt)));
    }
});
