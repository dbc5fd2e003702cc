// Command-line parsing for the desktop binary.

mod cli {
    include!("../src/cli.rs");
}

use clap::Parser;
use cli::Args;
use eyes_core::Variant;
use std::path::PathBuf;

#[test]
fn defaults_to_responsive_and_local_assets() {
    let args = Args::try_parse_from(["eyes-native"]).unwrap();
    assert_eq!(args.variant(), Variant::Responsive);
    assert_eq!(args.asset_dir, PathBuf::from("assets"));
}

#[test]
fn positionals_pick_variant_and_asset_dir() {
    let args = Args::try_parse_from(["eyes-native", "orthographic", "/tmp/scene"]).unwrap();
    assert_eq!(args.variant(), Variant::Orthographic);
    assert_eq!(args.asset_dir, PathBuf::from("/tmp/scene"));
}

#[test]
fn unknown_variant_falls_back_to_responsive() {
    let args = Args::try_parse_from(["eyes-native", "isometric"]).unwrap();
    assert_eq!(args.variant(), Variant::Responsive);
}

#[test]
fn help_prints_usage_instead_of_starting() {
    let err = Args::try_parse_from(["eyes-native", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn extra_arguments_are_rejected() {
    let err = Args::try_parse_from(["eyes-native", "perspective", "assets", "more"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
}
