use std::path::PathBuf;
use std::process::ExitCode;

use barsel::boilerplate::strip_boilerplate;
use barsel::lexicon::Lexicon;

fn main() -> ExitCode {
    let path = std::env::args().nth(1).map(PathBuf::from);

    println!("Lexicon Check Tool");
    println!("------------------");

    let lexicon = match Lexicon::load(path.as_deref()) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("Failed to load lexicon: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut problems = 0;

    println!("\nBoilerplate markers ({}):", lexicon.markers.len());
    let empty = lexicon.markers.iter().filter(|m| m.is_empty()).count();
    if empty > 0 {
        println!("  {} empty markers (ignored when stripping)", empty);
    }
    for (n, marker) in lexicon.markers.iter().enumerate() {
        // An earlier marker that rewrites this one leaves it unable to match.
        if strip_boilerplate(marker, &lexicon.markers[..n]) != *marker {
            println!("  '{}' is altered by an earlier marker", marker);
        }
    }

    println!(
        "\nNewspapers: {} left, {} right",
        lexicon.left_newspapers.len(),
        lexicon.right_newspapers.len()
    );
    let overlap = lexicon.orientation_overlap();
    if overlap.is_empty() {
        println!("  ✅ Orientation lists are disjoint");
    } else {
        problems += overlap.len();
        for name in overlap {
            println!("  ❌ '{}' is listed as both left and right", name);
        }
    }

    println!("\nLemma mapping ({} variants):", lexicon.mapping.len());
    let chains = lexicon.mapping.chains();
    if chains.is_empty() {
        println!("  ✅ No variant maps to another variant");
    } else {
        problems += chains.len();
        for chain in chains {
            println!(
                "  ❌ '{}' → '{}' but '{}' → '{}'",
                chain.variant, chain.canonical, chain.canonical, chain.remapped_to
            );
        }
    }
    for (canonical, variants) in lexicon.mapping.grouped() {
        println!("  {}: {}", canonical, variants.join(", "));
    }

    if problems > 0 {
        println!("\n{} problems found", problems);
        ExitCode::FAILURE
    } else {
        println!("\nLexicon OK");
        ExitCode::SUCCESS
    }
}
