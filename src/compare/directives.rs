use super::elements::check;
use crate::api::{Directive, Element};
use crate::model::{ApiMap, Position, PositionIndex, RelationKind};
use crate::reports::Reporter;
use std::collections::BTreeMap;

const fn relation(directive: &Directive) -> RelationKind {
    match directive {
        Directive::Requires { .. } => RelationKind::ModuleRequires,
        Directive::Exports { .. } => RelationKind::ModuleExports,
        Directive::Opens { .. } => RelationKind::ModuleOpens,
        Directive::Uses { .. } => RelationKind::ModuleUses,
        Directive::Provides { .. } => RelationKind::ModuleProvides,
    }
}

/// Compare module directives, matched by kind and subject.
pub(super) fn compare_directives<R: Reporter + ?Sized>(
    position: &Position,
    present: &ApiMap<&Element>,
    reporter: &mut R,
) -> bool {
    let mut grouped: BTreeMap<(RelationKind, &str), ApiMap<&Directive>> = BTreeMap::new();
    for (id, module) in present {
        for directive in &module.directives {
            grouped
                .entry((relation(directive), directive.subject()))
                .or_default()
                .entry(id.clone())
                .or_insert(directive);
        }
    }

    let mut equal = true;
    for ((kind, subject), found) in &grouped {
        let pos = position.relative_at(*kind, PositionIndex::Name((*subject).to_string()));
        let directives = found.project(present.keys(), |d| *d);
        equal &= check(reporter, &directives, |r, v| r.report_different_directives(&pos, v));
    }
    equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequiresModifier;
    use crate::model::{ApiId, ElementKey};
    use crate::reports::{EventRecorder, ReportEvent};
    use std::collections::BTreeSet;

    fn module(directives: Vec<Directive>) -> Element {
        let mut m = Element::module("mA", vec![]);
        m.directives = directives;
        m
    }

    fn exports(package: &str, targets: &[&str]) -> Directive {
        Directive::Exports {
            package: package.to_string(),
            targets: targets.iter().map(ToString::to_string).collect(),
        }
    }

    fn run(a: &Element, b: &Element) -> EventRecorder {
        let mut present = ApiMap::new();
        present.insert(ApiId::new(0, "a"), a);
        present.insert(ApiId::new(1, "b"), b);
        let mut recorder = EventRecorder::new();
        compare_directives(&Position::element(ElementKey::module("mA")), &present, &mut recorder);
        recorder
    }

    #[test]
    fn test_target_order_is_ignored() {
        let a = module(vec![exports("p", &["x", "y"])]);
        let b = module(vec![exports("p", &["y", "x"])]);
        assert_eq!(run(&a, &b).difference_count(), 0);
    }

    #[test]
    fn test_changed_and_missing_directives() {
        let requires = Directive::Requires {
            module: "java.sql".to_string(),
            modifiers: BTreeSet::from([RequiresModifier::Transitive]),
        };
        let a = module(vec![exports("p", &[]), requires]);
        let b = module(vec![exports("p", &["friend"])]);
        let recorder = run(&a, &b);

        let positions: Vec<String> = recorder
            .events()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Different { position, .. } => Some(position.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec!["exports p of module mA", "requires java.sql of module mA"]);
    }
}
