//! Integration tests for building a registry's block graph.

use blocksmith::build::{prune, BlockGraphBuilder, DiagnosticKind, Diagnostics, IgnoreRules};
use blocksmith::config::{parse_build_config, BuildConfig};
use blocksmith::error::BlocksmithError;
use blocksmith::language::LanguageRegistry;
use blocksmith::manifest::{Block, Category, Manifest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config(yaml: &str) -> BuildConfig {
    parse_build_config(yaml, Path::new("build.yml")).unwrap()
}

fn build(root: &Path, config: &BuildConfig, ignore: &IgnoreRules) -> (Vec<Category>, Diagnostics) {
    let languages = LanguageRegistry::default();
    let mut diagnostics = Diagnostics::new();
    let categories = BlockGraphBuilder::new(root, config, &languages, ignore)
        .build_all(&mut diagnostics)
        .unwrap();
    (categories, diagnostics)
}

fn find<'a>(categories: &'a [Category], specifier: &str) -> Option<&'a Block> {
    categories
        .iter()
        .flat_map(|c| c.blocks.iter())
        .find(|b| b.specifier() == specifier)
}

#[test]
fn single_file_block_scenario() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/buttons/primary-button.ts", "export const x = 1;\n");

    let (categories, diagnostics) = build(temp.path(), &config("dirs: [src]"), &IgnoreRules::empty());

    let block = find(&categories, "buttons/primary-button").unwrap();
    assert_eq!(block.name, "primary-button");
    assert_eq!(block.category, "buttons");
    assert!(!block.subdirectory);
    assert!(!block.tests);
    assert_eq!(block.files, vec!["primary-button.ts"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn subdirectory_block_scenario() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/utils/array/index.ts",
        "import { trim } from '../string/index.ts';\nexport const a = trim;\n",
    );
    write(temp.path(), "src/utils/array/index.test.ts", "import { a } from './index';\n");
    write(temp.path(), "src/utils/string/index.ts", "export const trim = 1;\n");

    let config = config("dirs: [src]\nallowSubdirectories: true\n");
    let (categories, _) = build(temp.path(), &config, &IgnoreRules::empty());

    let block = find(&categories, "utils/array").unwrap();
    assert!(block.subdirectory);
    assert!(block.tests);
    assert_eq!(
        block.local_dependencies.iter().collect::<Vec<_>>(),
        vec!["utils/string"]
    );
    assert_eq!(block.files, vec!["index.ts", "index.test.ts"]);
}

#[test]
fn ignored_and_excluded_categories_are_absent() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/ui/button.ts", "export {};\n");
    write(temp.path(), "src/generated/api.ts", "export {};\n");
    write(temp.path(), "src/internal/secret.ts", "export {};\n");

    let config = config("dirs: [src]\nexcludeCategories: [internal]\n");
    let ignore = IgnoreRules::from_patterns(["generated/"]);
    let (categories, _) = build(temp.path(), &config, &ignore);

    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ui"]);
}

#[test]
fn no_block_depends_on_itself() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/ui/button.ts",
        "import { b } from './button';\nimport { i } from './icon';\n",
    );
    write(temp.path(), "src/ui/icon.ts", "export const i = 1;\n");
    write(
        temp.path(),
        "src/ui/card/index.ts",
        "import { x } from '../card/body';\nimport { i } from '../icon';\n",
    );
    write(temp.path(), "src/ui/card/body.ts", "export const x = 1;\n");

    let config = config("dirs: [src]\nallowSubdirectories: true\n");
    let (categories, _) = build(temp.path(), &config, &IgnoreRules::empty());

    for block in categories.iter().flat_map(|c| c.blocks.iter()) {
        assert!(
            !block.local_dependencies.contains(&block.specifier()),
            "{} depends on itself",
            block.specifier()
        );
    }
    assert!(find(&categories, "ui/card")
        .unwrap()
        .local_dependencies
        .contains("ui/icon"));
}

#[test]
fn soft_issues_are_reported_not_fatal() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/ui/button.ts", "export {};\n");
    write(temp.path(), "src/ui/logo.png", "binary");
    write(temp.path(), "src/ui/card/index.ts", "export {};\n");

    let (categories, diagnostics) = build(temp.path(), &config("dirs: [src]"), &IgnoreRules::empty());

    assert_eq!(categories[0].blocks.len(), 1);
    assert_eq!(diagnostics.of_kind(DiagnosticKind::UnsupportedFile).count(), 1);
    let disallowed: Vec<_> = diagnostics
        .of_kind(DiagnosticKind::SubdirectoryDisallowed)
        .collect();
    assert_eq!(disallowed.len(), 1);
    assert!(disallowed[0].hint.as_deref().unwrap().contains("allowSubdirectories"));
}

#[test]
fn escaping_import_is_fatal() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/ui/button.ts", "import x from '../../../outside';\n");

    let languages = LanguageRegistry::default();
    let config = config("dirs: [src]");
    let ignore = IgnoreRules::empty();
    let mut diagnostics = Diagnostics::new();
    let result = BlockGraphBuilder::new(temp.path(), &config, &languages, &ignore)
        .build_all(&mut diagnostics);

    assert!(matches!(
        result,
        Err(BlocksmithError::DependencyResolutionFailed { .. })
    ));
}

#[test]
fn unlisted_dependency_survives_pruning() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/ui/button.ts", "import { t } from '../theme/tokens';\n");
    write(temp.path(), "src/theme/tokens.ts", "export const t = 1;\n");
    write(temp.path(), "src/theme/unused.ts", "export const u = 1;\n");

    let config = config("dirs: [src]\ndoNotListCategories: [theme]\n");
    let (categories, _) = build(temp.path(), &config, &IgnoreRules::empty());
    let pruned = prune(categories);

    let tokens = find(&pruned, "theme/tokens").unwrap();
    assert!(!tokens.list);
    assert!(find(&pruned, "theme/unused").is_none());
    assert_eq!(prune(pruned.clone()), pruned);
}

#[test]
fn manifest_round_trips_through_disk() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/ui/button.ts", "import clsx from 'clsx';\n");
    write(temp.path(), "package.json", r#"{"dependencies": {"clsx": "^2.1.0"}}"#);

    let (categories, _) = build(temp.path(), &config("dirs: [src]"), &IgnoreRules::empty());
    let manifest = Manifest::new(prune(categories));
    let path = manifest.write_to(&temp.path().join("dist")).unwrap();

    let read = Manifest::from_json(&fs::read_to_string(&path).unwrap(), "dist").unwrap();
    assert_eq!(read, manifest);
    let button = read.blocks().next().unwrap();
    assert!(button.dependencies.contains("clsx@^2.1.0"));
    assert_eq!(button.directory, PathBuf::from("src/ui"));
}

#[test]
fn category_roots_share_categories() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/ui/button.ts", "export const Button = 1;\n");
    write(temp.path(), "lib/ui/card.ts", "import { Button } from '../../src/ui/button';\n");
    write(temp.path(), "lib/ui/button.ts", "export const Other = 1;\n");

    let (categories, diagnostics) =
        build(temp.path(), &config("dirs: [src, lib]"), &IgnoreRules::empty());

    assert_eq!(categories.len(), 1);
    let card = find(&categories, "ui/card").unwrap();
    assert!(card.local_dependencies.contains("ui/button"));
    assert_eq!(find(&categories, "ui/button").unwrap().directory, PathBuf::from("src/ui"));
    assert_eq!(diagnostics.of_kind(DiagnosticKind::DuplicateBlockName).count(), 1);

    let dir = TempDir::new().unwrap();
    Manifest::new(prune(categories)).write_to(dir.path()).unwrap();
    let content = fs::read_to_string(dir.path().join("blocksmith-manifest.json")).unwrap();
    let manifest = Manifest::from_json(&content, "built").unwrap();
    assert_eq!(manifest.categories.len(), 1);
    assert_eq!(manifest.blocks().count(), 2);
}
