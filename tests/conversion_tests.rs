use cyprop::{convert_source, ClassDeclaration, ConvertError, ConvertOptions, NoGetter};

const TROUBLE: &str = include_str!("fixtures/trouble.pyx");

fn convert(source: &str, options: &ConvertOptions) -> String {
    convert_source(source, options)
        .expect("conversion failed")
        .to_text()
}

fn decorator_options() -> ConvertOptions {
    ConvertOptions::default().with_class_declaration(ClassDeclaration::Decorator)
}

#[cfg(test)]
mod fixture_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_options_match_expected_output() {
        let expected = include_str!("fixtures/skip.pyx");
        assert_eq!(convert(TROUBLE, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_convert_policy_synthesizes_getter() {
        let options = ConvertOptions::default().with_no_getter(NoGetter::Convert);
        let expected = include_str!("fixtures/convert.pyx");
        assert_eq!(convert(TROUBLE, &options), expected);
    }

    #[test]
    fn test_decorator_class_declaration() {
        let expected = include_str!("fixtures/pure_python.pyx");
        assert_eq!(convert(TROUBLE, &decorator_options()), expected);
    }

    #[test]
    fn test_fixture_reports_missing_getter() {
        let conversion = convert_source(TROUBLE, &ConvertOptions::default()).unwrap();
        assert!(conversion.modified);
        assert_eq!(conversion.violations.len(), 1);
        assert_eq!(conversion.violations[0].property, "url_match");
        assert_eq!(conversion.violations[0].declared_at, 49);
        assert_eq!(conversion.violations[0].line, 50);
    }
}

#[cfg(test)]
mod rewrite_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_getter_and_setter_with_inner_docstring() {
        let source = r#"property dep:
    def __get__(self):
        """doc"""
        return self.c.dep
    def __set__(self, v):
        self.c.dep = v
"#;
        let expected = r#"@property
def dep(self):
    """doc"""
    return self.c.dep
@dep.setter
def dep(self, v):
    self.c.dep = v
"#;
        assert_eq!(convert(source, &decorator_options()), expected);
    }

    #[test]
    fn test_deleter_gets_its_decorator() {
        let source = "cdef class A:
    property x:
        def __get__(self):
            return self._x
        def __del__(self):
            self._x = None
";
        let expected = "cdef class A:
    @property
    def x(self):
        return self._x
    @x.deleter
    def x(self):
        self._x = None
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_real_getter_after_synthesized_one_is_decorated() {
        let source = "cdef class A:
    property x:
        def __set__(self, v):
            self._x = v
        def __get__(self):
            return self._x
";
        let expected = "cdef class A:
    @property
    def x(self):
        pass
    @x.setter
    def x(self, v):
        self._x = v
    @x.getter
    def x(self):
        return self._x
";
        let options = ConvertOptions::default().with_no_getter(NoGetter::Convert);
        assert_eq!(convert(source, &options), expected);
    }

    #[test]
    fn test_lines_after_block_are_untouched() {
        let source = "cdef class A:
    property x:
        def __get__(self):
            return 1

    def method(self):
        return 2
";
        let output = convert(source, &ConvertOptions::default());
        assert!(output.ends_with("\n    def method(self):\n        return 2\n"));
    }

    #[test]
    fn test_blank_line_after_property_is_dropped() {
        let source = "cdef class A:
    property x:

        def __get__(self):
            return 1
";
        let expected = "cdef class A:
    @property
    def x(self):
        return 1
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_tab_indented_file() {
        let source = "cdef class A:\n\tproperty x:\n\t\tdef __get__(self):\n\t\t\treturn 1\n";
        let expected = "cdef class A:\n\t@property\n\tdef x(self):\n\t\treturn 1\n";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_indented_class_declaration_keeps_indent() {
        let source = "if COMPILED:\n    cdef class A:\n        pass\n";
        let expected = "if COMPILED:\n    @cython.cclass\n    class A:\n        pass\n";
        assert_eq!(convert(source, &decorator_options()), expected);
    }

    #[test]
    fn test_finalizer_outside_property_is_kept() {
        let source = "cdef class A:\n    def __del__(self):\n        pass\n";
        let conversion = convert_source(source, &ConvertOptions::default()).unwrap();
        assert!(!conversion.modified);
        assert_eq!(conversion.to_text(), source);
    }
}

#[cfg(test)]
mod comment_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comment_and_docstring_move_together() {
        let source = "cdef class A:
    property x:
        \"doc\"
        # first
        # second
        def __get__(self):
            return 1
";
        let expected = "cdef class A:
    @property
    def x(self):
        \"doc\"
        # first
        # second
        return 1
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_dedented_docstring_text_does_not_end_block() {
        let source = "cdef class A:
    property x:
        \"\"\"Title

but the text wanders left
        \"\"\"
        def __get__(self):
            return 1
";
        let expected = "cdef class A:
    @property
    def x(self):
        \"\"\"Title

but the text wanders left
        \"\"\"
        return 1
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_docstring_goes_to_getter_when_getter_is_synthesized() {
        let source = "cdef class A:
    property x:
        '''Only settable.'''
        def __set__(self, v):
            self._x = v
";
        let expected = "cdef class A:
    @property
    def x(self):
        '''Only settable.'''
        pass
    @x.setter
    def x(self, v):
        self._x = v
";
        let options = ConvertOptions::default().with_no_getter(NoGetter::Convert);
        assert_eq!(convert(source, &options), expected);
    }

    #[test]
    fn test_docstring_in_block_without_accessor_is_not_lost() {
        let source = "cdef class A:
    property x:
        \"doc\"
    def other(self):
        pass
";
        let output = convert(source, &ConvertOptions::default());
        assert_eq!(output.matches("\"doc\"").count(), 1);
        assert!(output.contains("\n    \"doc\"\n    def other(self):"));
    }

    #[test]
    fn test_docstring_after_leading_comment_moves_with_it() {
        let source = "cdef class A:
    property x:
        # note
        \"\"\"doc
        more\"\"\"
        def __get__(self):
            return 1
";
        let expected = "cdef class A:
    @property
    def x(self):
        # note
        \"\"\"doc
        more\"\"\"
        return 1
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_flushed_docstring_loses_one_indent() {
        let source = "cdef class A:
    property x:
        '''orphan'''
    y = 1
";
        let conversion = convert_source(source, &ConvertOptions::default()).unwrap();
        assert_eq!(
            conversion.lines,
            vec!["cdef class A:", "    @property", "    '''orphan'''", "    y = 1"]
        );
    }

    #[test]
    fn test_prefixed_docstring_is_reported_and_kept_in_place() {
        let source = "cdef class A:
    property x:
        r\"\"\"raw\"\"\"
        def __get__(self):
            return 1
";
        let conversion = convert_source(source, &ConvertOptions::default()).unwrap();
        assert_eq!(conversion.unrecognized_delimiters, vec![3]);
        assert_eq!(
            conversion.lines,
            vec![
                "cdef class A:",
                "    @property",
                "    r\"\"\"raw\"\"\"",
                "    def x(self):",
                "        return 1",
            ]
        );
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_indentation_is_fatal() {
        let source = "cdef class A:\n    property x:\n    \tdef __get__(self):\n";
        let err = convert_source(source, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::MixedIndentation { line: 3, .. }));
    }

    #[test]
    fn test_unsplittable_one_liner_is_fatal() {
        let source = "cdef class A:
    property x:
        \"doc\"
        def __get__(self): return self.d[1:]
";
        let err = convert_source(source, &ConvertOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsplittableCompoundLine {
                line: 4,
                text: "    def x(self): return self.d[1:]".to_string(),
            }
        );
    }

    #[test]
    fn test_colon_in_trailing_comment_is_not_a_body() {
        let source = "cdef class A:
    property x:
        \"doc\"
        def __get__(self):  # see: notes
            return 1
";
        let expected = "cdef class A:
    @property
    def x(self):  # see: notes
        \"doc\"
        return 1
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_colon_inside_string_body_still_splits() {
        let source = "cdef class A:
    property x:
        \"doc\"
        def __get__(self): return \"a:b\"  # keep: me
";
        let expected = "cdef class A:
    @property
    def x(self):
        \"doc\"
        return \"a:b\"  # keep: me
";
        assert_eq!(convert(source, &ConvertOptions::default()), expected);
    }

    #[test]
    fn test_one_liner_without_docstring_is_fine() {
        let source = "cdef class A:
    property x:
        def __get__(self): return self.d[1:]
";
        let output = convert(source, &ConvertOptions::default());
        assert!(output.contains("\n    def x(self): return self.d[1:]\n"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_without_properties_round_trips() {
        let source = "cdef class A:\n    cdef int x\n\n    def f(self):\n        return self.x\n";
        let conversion = convert_source(source, &ConvertOptions::default()).unwrap();
        assert!(!conversion.modified);
        assert_eq!(conversion.to_text(), source);
    }

    #[test]
    fn test_block_lines_lose_exactly_one_unit() {
        let source = "cdef class A:
  property x:
    def __get__(self):
      if self.y:
        return 1
      return 2
";
        let conversion = convert_source(source, &ConvertOptions::default()).unwrap();
        let input: Vec<&str> = source.lines().collect();
        for (out, orig) in conversion.lines[3..].iter().zip(&input[3..]) {
            assert_eq!(format!("  {out}"), *orig);
        }
    }

    #[test]
    fn test_every_setter_follows_a_getter() {
        for policy in [NoGetter::Skip, NoGetter::Convert] {
            let options = ConvertOptions::default().with_no_getter(policy);
            let conversion = convert_source(TROUBLE, &options).unwrap();
            for (i, line) in conversion.lines.iter().enumerate() {
                if let Some(rest) = line.trim().strip_prefix('@') {
                    if let Some((name, _)) = rest.split_once(".setter") {
                        let getter = format!("def {name}(");
                        assert!(
                            conversion.lines[..i].iter().any(|l| l.trim().starts_with(&getter)),
                            "setter for {name} has no getter before it"
                        );
                    }
                }
            }
        }
    }
}
