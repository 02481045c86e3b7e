fn main() {
    course_authoring_lib::run()
}
