// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt WiFi-Credentials ein und konfiguriert den Linker für ESP32-C6

/// Variablen, die aus .env bzw. der Umgebung an rustc weitergereicht werden
const BAKED_ENV_VARS: [&str; 2] = ["WIFI_SSID", "WIFI_PASSWORD"];

fn main() {
    // .env ist optional, dann müssen die Variablen in der Umgebung gesetzt sein
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Setze WIFI_SSID und WIFI_PASSWORD als Environment-Variablen");
    }

    for name in BAKED_ENV_VARS {
        println!("cargo:rerun-if-env-changed={}", name);
        if let Ok(value) = std::env::var(name) {
            println!("cargo:rustc-env={}={}", name, value);
        }
    }
    println!("cargo:rerun-if-changed=.env");

    linker_hints();

    // defmt.x zuerst, linkall.x MUSS als letztes kommen
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Registriert dieses Script als `--error-handling-script` des Linkers
///
/// Ruft der Linker uns mit `<kind> <symbol>` auf, geben wir einen Hinweis
/// auf die wahrscheinlich fehlende Konfiguration aus.
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();

    if let [_, kind, what, ..] = args.as_slice() {
        if kind != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match what.as_str() {
            w if w.starts_with("_defmt_") => {
                Some("`defmt` not found - make sure `defmt.x` is added as a linker script")
            }
            "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
            w if w.starts_with("esp_rtos_") => Some(
                "`esp-radio` has no scheduler enabled. Make sure `esp_rtos::start` is called",
            ),
            "free" | "malloc" | "calloc" | "get_free_internal_heap_size" | "malloc_internal"
            | "realloc_internal" | "calloc_internal" | "free_internal" => {
                Some("Did you forget the `esp-alloc` dependency?")
            }
            _ => None,
        };

        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }
        std::process::exit(0);
    }

    if let Ok(exe) = std::env::current_exe() {
        println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        );
    }
}
