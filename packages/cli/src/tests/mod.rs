// ABOUTME: Test modules for the server lifecycle
// ABOUTME: Compiled only under cfg(test)
