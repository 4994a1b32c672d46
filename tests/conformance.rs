mod conformance {
    mod validate;
}
