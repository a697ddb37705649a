use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy the precomputed trend table to OUT_DIR for include_str
    let trends_src = Path::new("../fixtures/trends_all_sites.csv");
    let trends_dest = Path::new(&out_dir).join("trends_all_sites.csv");
    if trends_src.exists() {
        fs::copy(trends_src, &trends_dest).unwrap();
    } else {
        println!("cargo:warning=fixtures/trends_all_sites.csv not found, embedding sample rows");
        fs::write(
            &trends_dest,
            "site_no,level_0,slope,Trend\n\
             395510075343201,p10,-0.42,decreasing\n\
             395510075343201,p50,0.05,no trend\n\
             395510075343201,p90,0.31,increasing\n",
        )
        .unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/trends_all_sites.csv");
}
